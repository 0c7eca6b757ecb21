/// Fuzzes the routing system by checking for many random boards that the
/// returned route is well formed, has minimum length (verified against an
/// independent breadth-first distance flood), is deterministic, and agrees
/// with the component-based reachability query.
use grid_routing::Board;
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::VecDeque;

fn random_board(w: usize, h: usize, rng: &mut StdRng) -> Board<u8> {
    let mut board: Board<u8> = Board::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            if rng.gen_bool(0.35) {
                board.set_cell(Point::new(x, y), Some(1)).unwrap();
            }
        }
    }
    board.update();
    board
}

fn visualize_board(board: &Board<u8>, route: &[Point]) {
    for y in 0..board.height() as i32 {
        for x in 0..board.width() as i32 {
            let p = Point::new(x, y);
            if route.contains(&p) {
                print!("o");
            } else if board.can_move_to(p) {
                print!(".");
            } else {
                print!("#");
            }
        }
        println!();
    }
}

/// Fewest steps from the entry boundary to any exit column cell, computed
/// with a plain breadth-first flood seeded on the empty entry column cells
/// (one step in from the virtual entry nodes).
fn reference_route_cost(board: &Board<u8>) -> Option<i32> {
    let w = board.width() as i32;
    let h = board.height() as i32;
    let mut dist = vec![i32::MAX; (w * h) as usize];
    let mut queue = VecDeque::new();
    for y in 0..h {
        let p = Point::new(0, y);
        if board.can_move_to(p) {
            dist[(y * w) as usize] = 1;
            queue.push_back(p);
        }
    }
    while let Some(p) = queue.pop_front() {
        let d = dist[(p.y * w + p.x) as usize];
        for (dx, dy) in [(-1, 0), (1, 0), (0, 1), (0, -1)] {
            let n = Point::new(p.x + dx, p.y + dy);
            if board.can_move_to(n) {
                let ix = (n.y * w + n.x) as usize;
                if dist[ix] > d + 1 {
                    dist[ix] = d + 1;
                    queue.push_back(n);
                }
            }
        }
    }
    (0..h)
        .map(|y| dist[(y * w + w - 1) as usize])
        .min()
        .filter(|&d| d != i32::MAX)
}

fn assert_route_well_formed(board: &Board<u8>, route: &[Point]) {
    let first = route.first().unwrap();
    let last = route.last().unwrap();
    assert_eq!(first.x, -1);
    assert!(first.y >= 0 && first.y < board.height() as i32);
    assert_eq!(last.x, board.width() as i32 - 1);
    for pair in route.windows(2) {
        let dx = (pair[1].x - pair[0].x).abs();
        let dy = (pair[1].y - pair[0].y).abs();
        assert_eq!(dx + dy, 1);
    }
    for p in &route[1..] {
        assert!(board.can_move_to(*p));
    }
}

#[test]
fn fuzz() {
    const N_BOARDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for i in 0..N_BOARDS {
        let w = rng.gen_range(1..=8);
        let h = rng.gen_range(1..=8);
        let board = random_board(w, h, &mut rng);
        let route = board.find_path();
        match reference_route_cost(&board) {
            Some(cost) => {
                if route.len() != cost as usize + 1 {
                    println!("Board {} ({}x{}), expected cost {}:", i, w, h, cost);
                    visualize_board(&board, &route);
                }
                assert_eq!(route.len(), cost as usize + 1);
                assert_route_well_formed(&board, &route);
            }
            None => {
                if !route.is_empty() {
                    println!("Board {} ({}x{}), expected no route:", i, w, h);
                    visualize_board(&board, &route);
                }
                assert!(route.is_empty());
            }
        }
        assert_eq!(route.is_empty(), !board.route_exists());
        assert_eq!(route, board.find_path());
    }
}
