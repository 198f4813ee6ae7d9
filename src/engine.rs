use crate::grid::{Cell, Velocity};
use crate::snake::Snake;

/// What a single move did to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub new_head: Cell,
    pub old_tail: Option<Cell>,
    pub ate_food: bool,
}

/// Moves the snake one cell along `velocity`. The body grows by one when the
/// new head lands on `food`, otherwise the tail is dropped. Food and score are
/// left to the caller.
pub fn advance(snake: &mut Snake, velocity: Velocity, food: Option<Cell>) -> Step {
    let new_head = snake.head() + velocity;
    snake.push_head(new_head);

    if food == Some(new_head) {
        Step { new_head, old_tail: None, ate_food: true }
    } else {
        let old_tail = snake.pop_tail();
        Step { new_head, old_tail, ate_food: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    const U: i32 = 25;

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.cells().collect()
    }

    #[test]
    fn eating_grows_the_body() {
        let mut snake = Snake::initial(U);
        let step = advance(&mut snake, Direction::Right.velocity(U), Some(Cell::new(125, 0)));

        assert!(step.ate_food);
        assert_eq!(step.old_tail, None);
        assert_eq!(
            cells(&snake),
            vec![
                Cell::new(125, 0),
                Cell::new(100, 0),
                Cell::new(75, 0),
                Cell::new(50, 0),
                Cell::new(0, 0)
            ]
        );
    }

    #[test]
    fn moving_keeps_the_length() {
        let mut snake = Snake::initial(U);
        let step = advance(&mut snake, Direction::Right.velocity(U), Some(Cell::new(500, 500)));

        assert!(!step.ate_food);
        assert_eq!(step.new_head, Cell::new(125, 0));
        assert_eq!(step.old_tail, Some(Cell::new(0, 0)));
        assert_eq!(
            cells(&snake),
            vec![Cell::new(125, 0), Cell::new(100, 0), Cell::new(75, 0), Cell::new(50, 0)]
        );
    }

    #[test]
    fn length_is_stable_without_food() {
        let mut snake = Snake::initial(U);
        let path = [Direction::Right, Direction::Down, Direction::Down, Direction::Left, Direction::Down];
        for dir in path.iter().cycle().take(40) {
            let before = snake.len();
            let step = advance(&mut snake, dir.velocity(U), None);
            assert!(!step.ate_food);
            assert_eq!(snake.len(), before);
        }
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn growth_is_at_most_one_per_step() {
        let mut snake = Snake::initial(U);
        let v = Direction::Down.velocity(U);
        for i in 1..=5 {
            let food = snake.head() + v;
            let before = snake.len();
            assert!(advance(&mut snake, v, Some(food)).ate_food);
            assert_eq!(snake.len(), before + 1);
            assert_eq!(snake.head(), Cell::new(100, U * i));
        }
    }
}
