use grid_routing::Board;

// In this example a route is found across an open 3x2 board. Agents enter
// through the virtual column left of the board and leave through the
// rightmost column, so the route has one position more than the board is
// wide.
fn main() {
    let board: Board<u8> = Board::new(3, 2);
    println!("{}", board);
    let route = board.find_path();
    println!("A route has been found:");
    for p in route {
        println!("{:?}", p);
    }
}
