use grid_routing::Board;
use grid_util::point::Point;

// In this example the middle column of a 3x2 board is fully occupied, so no
// route exists. The component query answers this without running a search,
// and the search itself returns an empty route.
fn main() {
    let mut board: Board<u8> = Board::new(3, 2);
    for y in 0..2 {
        board
            .set_cell(Point::new(1, y), Some(1))
            .expect("middle column is on the board");
    }
    board.update();
    println!("{}", board);
    println!("route_exists: {}", board.route_exists());
    let route = board.find_path();
    println!("find_path returned {} positions", route.len());
}
