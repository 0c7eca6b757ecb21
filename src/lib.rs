//! # grid_routing
//!
//! Routing core for grid-based strategy simulations. A [Board] is a
//! fixed-size occupancy grid whose cells hold at most one opaque occupant
//! each. [Board::find_path] computes a minimum-step route for agents
//! entering from a virtual column just left of the board and leaving
//! through the rightmost column, moving orthogonally through empty cells.
//! Connected components over the empty cells are maintained in a
//! [UnionFind] structure so that callers can cheaply ask whether any route
//! survives an obstacle placement without running a full search.
mod search;

use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::search::uniform_cost_search;
use core::fmt;

/// Neighbour expansion order used by the route search. The order is part of
/// the routing contract: together with the most-recent-first tie-break it
/// fixes which of several equally short routes is returned.
const ROUTE_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Error returned when a cell is read or written at a position outside the
/// board. Carries the offending position.
///
/// Note that the virtual entry positions at `x = -1` appearing in routes are
/// not board cells; reading them yields this error too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds(pub Point);

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "position {} is outside the board", self.0)
    }
}

impl std::error::Error for OutOfBounds {}

/// [Board] is a `width` x `height` occupancy grid storing one optional
/// occupant per cell. Occupants are opaque to the routing core: only their
/// presence matters, so the occupant type `T` is free. In addition to the
/// raw cells the board tracks connected components of empty cells, kept
/// current with the dirty-flag protocol that [update](Self::update)
/// documents.
#[derive(Clone, Debug)]
pub struct Board<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl<T> Board<T> {
    /// Creates an empty board. Dimensions are fixed for the lifetime of the
    /// board.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        let mut board = Board {
            width,
            height,
            cells: std::iter::repeat_with(|| None).take(width * height).collect(),
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        board.generate_components();
        board
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `position` addresses a cell of the board.
    pub fn is_on_board(&self, position: Point) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.width
            && (position.y as usize) < self.height
    }

    /// The occupant at `position`, or [None] for an empty cell.
    pub fn get_cell(&self, position: Point) -> Result<Option<&T>, OutOfBounds> {
        if !self.is_on_board(position) {
            return Err(OutOfBounds(position));
        }
        Ok(self.cells[self.cell_index(position)].as_ref())
    }

    /// Writes `occupant` at `position`, overwriting whatever was there.
    /// Whether overwriting an occupied cell is legal is the caller's policy;
    /// the board itself never refuses an in-bounds write.
    pub fn set_cell(&mut self, position: Point, occupant: Option<T>) -> Result<(), OutOfBounds> {
        if !self.is_on_board(position) {
            return Err(OutOfBounds(position));
        }
        let ix = self.cell_index(position);
        let was_empty = self.cells[ix].is_none();
        let blocking = occupant.is_some();
        self.cells[ix] = occupant;
        if blocking {
            // Occupying a cell can split a component in two, which a
            // union-find cannot express incrementally.
            if was_empty {
                self.components_dirty = true;
            }
        } else {
            // Clearing a cell only ever joins components.
            for neighbour in self.orthogonal_neighbours(position) {
                if self.can_move_to(neighbour) {
                    let n_ix = self.cell_index(neighbour);
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }

    /// Whether an agent may stand on `position`: on the board and empty.
    pub fn can_move_to(&self, position: Point) -> bool {
        self.is_on_board(position) && self.cells[self.cell_index(position)].is_none()
    }

    fn cell_index(&self, position: Point) -> usize {
        position.y as usize * self.width + position.x as usize
    }

    fn orthogonal_neighbours(&self, position: Point) -> impl Iterator<Item = Point> {
        ROUTE_DIRECTIONS
            .into_iter()
            .map(move |(dx, dy)| Point::new(position.x + dx, position.y + dy))
    }

    fn route_neighbours(&self, node: &Point) -> Vec<(Point, i32)> {
        self.orthogonal_neighbours(*node)
            .filter(|p| self.can_move_to(*p))
            .map(|p| (p, 1))
            .collect()
    }

    /// Computes a minimum-step route from the virtual entry column at
    /// `x = -1` to any cell in the rightmost column. The route starts at an
    /// entry position `(-1, y)`, every consecutive pair of positions is
    /// orthogonally adjacent, and every position after the first is an empty
    /// board cell. An empty vector means no route exists; that is a regular
    /// outcome, not a fault.
    ///
    /// The search is deterministic: one entry node is seeded per row in row
    /// order, neighbours expand left, right, up, down, and cost ties in the
    /// frontier resolve to the most recently discovered node. Calling this
    /// twice on an unmodified board returns the same route.
    pub fn find_path(&self) -> Vec<Point> {
        let entries = (0..self.height as i32).map(|y| Point::new(-1, y));
        let exit_x = self.width as i32 - 1;
        match uniform_cost_search(
            entries,
            |node| self.route_neighbours(node),
            |node: &Point| node.x == exit_x,
        ) {
            Some((route, _cost)) => route,
            None => Vec::new(),
        }
    }

    /// Regenerates the components if they are marked as dirty. Call this
    /// after placing occupants and before querying
    /// [route_exists](Self::route_exists).
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up empty orthogonal
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.width * self.height);
        self.components_dirty = false;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let point = Point::new(x, y);
                if !self.can_move_to(point) {
                    continue;
                }
                let parent_ix = self.cell_index(point);
                for neighbour in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.can_move_to(neighbour) {
                        let ix = self.cell_index(neighbour);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Whether any entry-to-exit route currently exists, answered from the
    /// component structure without running a search. Placement policy (for
    /// instance refusing an obstacle that would seal the board) can be built
    /// on this. Reflects mutations only after [update](Self::update) or
    /// [generate_components](Self::generate_components) has run.
    pub fn route_exists(&self) -> bool {
        let entry_cells: Vec<usize> = (0..self.height as i32)
            .map(|y| Point::new(0, y))
            .filter(|p| self.can_move_to(*p))
            .map(|p| self.cell_index(p))
            .collect();
        let exit_x = self.width as i32 - 1;
        for y in 0..self.height as i32 {
            let exit = Point::new(exit_x, y);
            if !self.can_move_to(exit) {
                continue;
            }
            let exit_ix = self.cell_index(exit);
            if entry_cells
                .iter()
                .any(|&entry_ix| self.components.equiv(entry_ix, exit_ix))
            {
                return true;
            }
        }
        info!("No empty entry column cell shares a component with the exit column");
        false
    }
}

impl<T> fmt::Display for Board<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Board:")?;
        for y in 0..self.height as i32 {
            let values = (0..self.width as i32)
                .map(|x| !self.can_move_to(Point::new(x, y)) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
