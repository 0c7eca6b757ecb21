use grid_routing::Board;
use grid_util::point::Point;

// In this example a route is found on a 5x2 board with shape
//
//  #
//    #
//
// where # marks an obstacle. Every row is obstructed somewhere, so the
// route has to change rows once between the two walls.
fn main() {
    let mut board: Board<u8> = Board::new(5, 2);
    board
        .set_cell(Point::new(1, 0), Some(1))
        .expect("wall cell is on the board");
    board
        .set_cell(Point::new(3, 1), Some(1))
        .expect("wall cell is on the board");
    println!("{}", board);
    let route = board.find_path();
    println!("A route has been found:");
    for p in route {
        println!("{:?}", p);
    }
}
