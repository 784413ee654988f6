use std::{
    collections::HashMap,
    fmt::{self, Write},
    ops::{Index, IndexMut},
};

use log::debug;
use strum::{EnumIter, VariantArray};

use crate::{
    env::{DiscreteActionSpace, Environment},
    error::{Error, Result},
};

/// Side length of the square grid
pub const SIZE: usize = 6;

/// Cell the agent starts every episode in
pub const START: Pos = (0, 0);

/// Cell that ends the episode when the agent reaches it
pub const GOAL: Pos = (5, 5);

/// Grid coordinates as `(row, column)`
pub type Pos = (i32, i32);

/// The four moves available in the maze, in canonical order
///
/// Greedy action selection breaks ties by this order, so it must not change.
#[derive(EnumIter, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// Coordinate offset applied by the move
    pub const fn delta(self) -> Pos {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Free,
    Wall,
    Agent,
}

type Grid = [[Cell; SIZE]; SIZE];

/// Reference wall layout with the agent on the start cell
fn layout() -> Grid {
    let mut grid = [[Cell::Free; SIZE]; SIZE];
    for col in 0..5 {
        grid[5][col] = Cell::Wall;
    }
    for row in 0..4 {
        grid[row][5] = Cell::Wall;
    }
    for col in 2..SIZE {
        grid[2][col] = Cell::Wall;
    }
    grid[3][2] = Cell::Wall;
    grid[START.0 as usize][START.1 as usize] = Cell::Agent;
    grid
}

fn in_bounds(pos: Pos) -> bool {
    (0..SIZE as i32).contains(&pos.0) && (0..SIZE as i32).contains(&pos.1)
}

/// A small maze with static walls that a mouse has to find its way out of
///
/// Every step costs a reward of -1 until the agent stands on [`GOAL`]. The set of legal
/// moves for each cell is computed once at construction since walls never move.
pub struct Maze {
    grid: Grid,
    pos: Pos,
    steps: u32,
    legal: HashMap<Pos, Vec<Action>>,
}

impl Maze {
    pub fn new() -> Self {
        let mut maze = Self {
            grid: layout(),
            pos: START,
            steps: 0,
            legal: HashMap::new(),
        };
        maze.legal = maze
            .states()
            .into_iter()
            .map(|state| {
                let actions = Action::VARIANTS
                    .iter()
                    .copied()
                    .filter(|&a| maze.is_legal_move(&state, a))
                    .collect();
                (state, actions)
            })
            .collect();
        maze
    }

    /// Current position of the agent
    pub fn position(&self) -> Pos {
        self.pos
    }

    /// Kind of the cell at `pos`, or `None` if it lies outside the grid
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        in_bounds(pos).then(|| self[pos])
    }

    /// Whether taking `action` from `state` lands on a cell inside the grid that is not a wall
    ///
    /// The agent's own cell counts as passable.
    pub fn is_legal_move(&self, state: &Pos, action: Action) -> bool {
        matches!(
            self.cell(Self::successor(state, action)),
            Some(Cell::Free | Cell::Agent)
        )
    }

    /// Legal moves from `state`, looked up in the precomputed table
    pub fn legal_actions(&self, state: &Pos) -> &[Action] {
        self.legal.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lay out a value table over the grid, one row per line, with `X` for cells that have no value
    pub fn render_values(&self, values: &HashMap<Pos, f32>) -> String {
        let mut out = String::new();
        for row in 0..SIZE as i32 {
            for col in 0..SIZE as i32 {
                let _ = match values.get(&(row, col)) {
                    Some(v) => write!(out, "{v:>10.6}"),
                    None => write!(out, "{:>10}", "X"),
                };
            }
            out.push('\n');
        }
        out
    }

    fn move_to(&mut self, pos: Pos) {
        let old = self.pos;
        self[old] = Cell::Free;
        self.pos = pos;
        self[pos] = Cell::Agent;
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Pos> for Maze {
    type Output = Cell;

    fn index(&self, index: Pos) -> &Self::Output {
        &self.grid[index.0 as usize][index.1 as usize]
    }
}

impl IndexMut<Pos> for Maze {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        &mut self.grid[index.0 as usize][index.1 as usize]
    }
}

impl Environment for Maze {
    type State = Pos;
    type Action = Action;

    fn start(&self) -> Self::State {
        START
    }

    fn is_terminal(&self) -> bool {
        self.pos == GOAL
    }

    fn step(&mut self, action: Self::Action) -> Result<()> {
        if !self.legal_actions(&self.pos).contains(&action) {
            return Err(Error::IllegalMove {
                state: format!("{:?}", self.pos),
                action: format!("{action:?}"),
            });
        }

        self.move_to(Self::successor(&self.pos, action));
        self.steps += 1;
        Ok(())
    }

    fn state_and_reward(&self) -> (Self::State, f32) {
        let reward = if self.is_terminal() { 0.0 } else { -1.0 };
        (self.pos, reward)
    }

    fn steps(&self) -> u32 {
        self.steps
    }

    fn truncate(&mut self) {
        debug!("truncating episode at {:?} after {} steps", self.pos, self.steps);
        self.move_to(GOAL);
    }

    fn reset(&mut self) -> Self::State {
        self.grid = layout();
        self.pos = START;
        self.steps = 0;
        debug!("maze reset");
        self.pos
    }
}

impl DiscreteActionSpace for Maze {
    fn actions(&self, state: &Self::State) -> &[Self::Action] {
        self.legal_actions(state)
    }

    fn states(&self) -> Vec<Self::State> {
        (0..SIZE as i32)
            .flat_map(|row| (0..SIZE as i32).map(move |col| (row, col)))
            .filter(|&pos| self[pos] != Cell::Wall)
            .collect()
    }

    fn successor(state: &Self::State, action: Self::Action) -> Self::State {
        let (dy, dx) = action.delta();
        (state.0 + dy, state.1 + dx)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE as i32 {
            let line = (0..SIZE as i32)
                .map(|col| match self[(row, col)] {
                    Cell::Wall => 'X',
                    Cell::Agent => 'R',
                    Cell::Free if (row, col) == GOAL => 'G',
                    Cell::Free => '.',
                })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
