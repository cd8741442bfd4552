use crate::state::{Identify, State};

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    fn reverse(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

// Tile t belongs at index t - 1, the blank in the last cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingPuzzle {
    pub width: usize,
    pub height: usize,
}

impl SlidingPuzzle {
    pub fn new(width: usize, height: usize) -> Self {
        SlidingPuzzle { width, height }
    }

    fn cells(&self) -> usize {
        self.width * self.height
    }

    pub fn solved(&self) -> Board {
        let cells = self.cells();
        let mut tiles: Vec<u8> = (1..cells).map(|tile| tile as u8).collect();
        tiles.push(0);
        Board {
            tiles,
            width: self.width,
            blank: cells - 1,
            moves: 0,
            last: None,
        }
    }

    pub fn shuffled<R: Rng>(&self, shuffles: usize, rng: &mut R) -> Board {
        let mut board = self.solved();
        for _ in 0..shuffles {
            let moves: Vec<Move> = Move::ALL
                .into_iter()
                .filter(|&step| board.last.map_or(true, |last| last.reverse() != step))
                .filter(|&step| self.target(board.blank, step).is_some())
                .collect();
            if let Some(&step) = moves.choose(rng) {
                board = self.slide(&board, step);
            }
        }
        Board {
            moves: 0,
            last: None,
            ..board
        }
    }

    fn target(&self, blank: usize, step: Move) -> Option<usize> {
        let (row, col) = (blank / self.width, blank % self.width);
        match step {
            Move::Up if row > 0 => Some(blank - self.width),
            Move::Down if row + 1 < self.height => Some(blank + self.width),
            Move::Left if col > 0 => Some(blank - 1),
            Move::Right if col + 1 < self.width => Some(blank + 1),
            _ => None,
        }
    }

    fn slide(&self, board: &Board, step: Move) -> Board {
        let mut next = board.clone();
        if let Some(target) = self.target(board.blank, step) {
            next.tiles.swap(board.blank, target);
            next.blank = target;
            next.moves += 1;
            next.last = Some(step);
        }
        next
    }

    fn goal_of(&self, tile: u8) -> (usize, usize) {
        let index = tile as usize - 1;
        (index / self.width, index % self.width)
    }

    fn manhattan(&self, board: &Board) -> usize {
        board
            .tiles
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile != 0)
            .map(|(index, &tile)| {
                let (row, col) = self.goal_of(tile);
                row.abs_diff(index / self.width) + col.abs_diff(index % self.width)
            })
            .sum()
    }

    fn linear_conflicts(&self, board: &Board) -> usize {
        let mut total = 0;
        for row in 0..self.height {
            // goal columns of the tiles that belong in this row, left to right
            let line: Vec<usize> = (0..self.width)
                .map(|col| board.tiles[row * self.width + col])
                .filter(|&tile| tile != 0 && self.goal_of(tile).0 == row)
                .map(|tile| self.goal_of(tile).1)
                .collect();
            total += line_conflicts(line);
        }
        for col in 0..self.width {
            let line: Vec<usize> = (0..self.height)
                .map(|row| board.tiles[row * self.width + col])
                .filter(|&tile| tile != 0 && self.goal_of(tile).1 == col)
                .map(|tile| self.goal_of(tile).0)
                .collect();
            total += line_conflicts(line);
        }
        total
    }
}

// Tiles that must leave the line so the rest is in goal order: everything
// outside a longest increasing run. Each costs at least two extra moves.
fn line_conflicts(line: Vec<usize>) -> usize {
    // tails[k] is the smallest last element of an increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::with_capacity(line.len());
    for &goal in &line {
        match tails.binary_search(&goal) {
            Ok(_) => {}
            Err(at) if at == tails.len() => tails.push(goal),
            Err(at) => tails[at] = goal,
        }
    }
    line.len() - tails.len()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub tiles: Vec<u8>,
    pub width: usize,
    pub blank: usize,
    pub moves: usize,
    pub last: Option<Move>,
}

impl State<SlidingPuzzle> for Board {
    fn cost(&self, _puzzle: &SlidingPuzzle) -> f64 {
        self.moves as f64
    }

    fn is_goal(&self, puzzle: &SlidingPuzzle) -> bool {
        self.blank == puzzle.cells() - 1
            && self.tiles[..self.blank]
                .iter()
                .enumerate()
                .all(|(index, &tile)| tile as usize == index + 1)
    }

    fn expand(&self, puzzle: &SlidingPuzzle) -> Vec<Self> {
        Move::ALL
            .into_iter()
            .filter(|&step| self.last.map_or(true, |last| last.reverse() != step))
            .filter(|&step| puzzle.target(self.blank, step).is_some())
            .map(|step| puzzle.slide(self, step))
            .collect()
    }

    fn heuristic(&self, puzzle: &SlidingPuzzle) -> f64 {
        (puzzle.manhattan(self) + 2 * puzzle.linear_conflicts(self)) as f64
    }
}

impl Identify for Board {
    type Id = Vec<u8>;

    fn id(&self) -> Vec<u8> {
        self.tiles.clone()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .tiles
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|tile| tile.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        write!(f, "{}", rows.join(" / "))
    }
}
