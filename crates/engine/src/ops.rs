use rand::Rng;

use crate::state::{Board, Move, MoveResult};

/// Slide and merge every line of `board` toward `dir`. No randomness.
///
/// Rows are the lines for `Left`/`Right`, columns for `Up`/`Down`. A single
/// line-collapse routine serves all four directions: for `Right` and `Down`
/// the line is traversed in reverse, which is equivalent to reversing it
/// before and after the collapse. The four lines never interact, so their
/// processing order is irrelevant.
pub fn resolve(board: Board, dir: Move) -> MoveResult {
    let mut next = board.0;
    let mut gained = 0;
    for line_idx in 0..4 {
        let idx = line_cells(dir, line_idx);
        let line = idx.map(|i| board.0[i]);
        let (collapsed, line_gain) = slide_and_merge(line);
        gained += line_gain;
        for (&i, v) in idx.iter().zip(collapsed) {
            next[i] = v;
        }
    }
    let next = Board(next);
    MoveResult {
        board: next,
        changed: next != board,
        gained,
    }
}

/// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty
/// cell. A full board is a valid input and is returned unchanged without
/// consuming any draws; otherwise exactly two draws are made, the slot
/// index first and the tile value second.
pub fn spawn_random_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Board {
    let empty: Vec<usize> = (0..16).filter(|&i| board.0[i] == 0).collect();
    if empty.is_empty() {
        return board;
    }
    let slot = empty[rng.gen_range(0..empty.len())];
    let mut next = board.0;
    next[slot] = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
    Board(next)
}

/// True if some move can still change the board.
///
/// Any empty cell qualifies, as does any equal nonzero pair adjacent along
/// a row or a column. Both axes must be scanned; checking only one would
/// report game over on boards that still have a vertical (or horizontal)
/// merge left.
pub fn has_available_move(board: Board) -> bool {
    if board.0.iter().any(|&v| v == 0) {
        return true;
    }
    for row in 0..4 {
        for col in 0..4 {
            let v = board.get(row, col);
            if col < 3 && v == board.get(row, col + 1) {
                return true;
            }
            if row < 3 && v == board.get(row + 1, col) {
                return true;
            }
        }
    }
    false
}

/// Board indices of one line, ordered so that index 0 is the edge tiles
/// slide toward. Reversed orders for `Right`/`Down` bake in the
/// reverse-collapse-reverse trick.
fn line_cells(dir: Move, line: usize) -> [usize; 4] {
    match dir {
        Move::Left => [line * 4, line * 4 + 1, line * 4 + 2, line * 4 + 3],
        Move::Right => [line * 4 + 3, line * 4 + 2, line * 4 + 1, line * 4],
        Move::Up => [line, line + 4, line + 8, line + 12],
        Move::Down => [line + 12, line + 8, line + 4, line],
    }
}

/// Collapse one line toward index 0: drop zeros preserving order, then make
/// a single left-to-right pass merging each adjacent equal pair into one
/// doubled tile. A tile produced by a merge cannot merge again within the
/// same pass, so `[2, 2, 2, 2]` collapses to `[4, 4, 0, 0]`, not `[8, ...]`.
/// Returns the collapsed line and the sum of the doubled values.
fn slide_and_merge(line: [u32; 4]) -> ([u32; 4], u64) {
    let survivors: Vec<u32> = line.into_iter().filter(|&v| v != 0).collect();
    let mut out = [0u32; 4];
    let mut gained = 0u64;
    let mut write = 0;
    let mut read = 0;
    while read < survivors.len() {
        if read + 1 < survivors.len() && survivors[read] == survivors[read + 1] {
            let merged = survivors[read] * 2;
            out[write] = merged;
            gained += u64::from(merged);
            read += 2;
        } else {
            out[write] = survivors[read];
            read += 1;
        }
        write += 1;
    }
    (out, gained)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn b(cells: [u32; 16]) -> Board {
        Board::try_from_cells(cells).unwrap()
    }

    /// Mirror each row left-to-right.
    fn mirror(board: Board) -> Board {
        let mut cells = [0u32; 16];
        for row in 0..4 {
            for col in 0..4 {
                cells[row * 4 + col] = board.get(row, 3 - col);
            }
        }
        Board::try_from_cells(cells).unwrap()
    }

    #[test]
    fn it_slide_and_merge() {
        assert_eq!(slide_and_merge([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
        assert_eq!(slide_and_merge([2, 4, 2, 4]), ([2, 4, 2, 4], 0));
        assert_eq!(slide_and_merge([0, 2, 0, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(slide_and_merge([2, 2, 4, 4]), ([4, 8, 0, 0], 12));
        assert_eq!(slide_and_merge([0, 0, 0, 8]), ([8, 0, 0, 0], 0));
        assert_eq!(slide_and_merge([2, 4, 2, 0]), ([2, 4, 2, 0], 0));
    }

    #[test]
    fn it_merges_single_pass_only() {
        // Four equal tiles merge pairwise, never chaining into one tile.
        assert_eq!(slide_and_merge([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(slide_and_merge([4, 4, 4, 0]), ([8, 4, 0, 0], 8));
        assert_eq!(slide_and_merge([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
    }

    #[test]
    fn test_resolve_left() {
        let board = b([
            2, 2, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let r = resolve(board, Move::Left);
        assert_eq!(
            r.board,
            b([
                4, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0,
            ])
        );
        assert!(r.changed);
        assert_eq!(r.gained, 4);
    }

    #[test]
    fn test_resolve_right() {
        let board = b([
            2, 2, 2, 2, //
            2, 0, 0, 2, //
            4, 2, 0, 0, //
            0, 0, 0, 0,
        ]);
        let r = resolve(board, Move::Right);
        assert_eq!(
            r.board,
            b([
                0, 0, 4, 4, //
                0, 0, 0, 4, //
                0, 0, 4, 2, //
                0, 0, 0, 0,
            ])
        );
        assert!(r.changed);
        assert_eq!(r.gained, 12);
    }

    #[test]
    fn test_resolve_up() {
        let board = b([
            2, 0, 4, 0, //
            2, 2, 0, 0, //
            4, 0, 4, 0, //
            4, 2, 0, 2,
        ]);
        let r = resolve(board, Move::Up);
        assert_eq!(
            r.board,
            b([
                4, 4, 8, 2, //
                8, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0,
            ])
        );
        assert!(r.changed);
        assert_eq!(r.gained, 4 + 8 + 4 + 8);
    }

    #[test]
    fn test_resolve_down() {
        let board = b([
            2, 0, 4, 0, //
            2, 2, 0, 0, //
            4, 0, 4, 0, //
            4, 2, 0, 2,
        ]);
        let r = resolve(board, Move::Down);
        assert_eq!(
            r.board,
            b([
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                4, 0, 0, 0, //
                8, 4, 8, 2,
            ])
        );
        assert!(r.changed);
        assert_eq!(r.gained, 4 + 8 + 4 + 8);
    }

    #[test]
    fn it_reports_noop_moves_unchanged() {
        // Already fully compacted left with no merges available.
        let board = b([
            2, 4, 8, 16, //
            4, 2, 4, 2, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let r = resolve(board, Move::Left);
        assert_eq!(r.board, board);
        assert!(!r.changed);
        assert_eq!(r.gained, 0);

        // Repeating a no-op move stays a no-op with gain 0.
        let again = resolve(r.board, Move::Left);
        assert_eq!(again.board, board);
        assert!(!again.changed);
        assert_eq!(again.gained, 0);
    }

    #[test]
    fn it_is_symmetric_under_mirroring() {
        let boards = [
            b([
                2, 2, 2, 2, //
                0, 2, 0, 2, //
                4, 4, 2, 0, //
                8, 0, 0, 8,
            ]),
            b([
                2, 4, 2, 4, //
                16, 16, 8, 8, //
                0, 0, 0, 2, //
                32, 0, 32, 4,
            ]),
        ];
        for board in boards {
            let right = resolve(board, Move::Right);
            let left = resolve(mirror(board), Move::Left);
            assert_eq!(right.board, mirror(left.board));
            assert_eq!(right.changed, left.changed);
            assert_eq!(right.gained, left.gained);
        }
    }

    #[test]
    fn it_spawns_on_an_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = b([
            2, 4, 8, 16, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        for _ in 0..32 {
            let next = spawn_random_tile(board, &mut rng);
            assert_eq!(next.count_empty(), board.count_empty() - 1);
            // Exactly one cell changed, from 0 to 2 or 4.
            let diff: Vec<(u32, u32)> = board
                .tiles()
                .zip(next.tiles())
                .filter(|(a, b)| a != b)
                .collect();
            assert_eq!(diff.len(), 1);
            assert_eq!(diff[0].0, 0);
            assert!(diff[0].1 == 2 || diff[0].1 == 4);
        }
    }

    #[test]
    fn it_spawn_fills_the_board() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::EMPTY;
        for _ in 0..16 {
            board = spawn_random_tile(board, &mut rng);
        }
        assert_eq!(board.count_empty(), 0);
    }

    #[test]
    fn it_spawn_on_full_board_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = b([
            2, 4, 2, 4, //
            4, 2, 4, 2, //
            2, 4, 2, 4, //
            4, 2, 4, 2,
        ]);
        assert_eq!(spawn_random_tile(board, &mut rng), board);
    }

    #[test]
    fn it_detects_available_moves() {
        // Any empty cell means a move exists, regardless of adjacency.
        let mut cells = [2u32; 16];
        cells[9] = 0;
        assert!(has_available_move(b(cells)));
        assert!(has_available_move(Board::EMPTY));

        // Full board, no equal neighbors in any row or column.
        let dead = b([
            2, 4, 2, 4, //
            4, 2, 4, 2, //
            2, 4, 2, 4, //
            4, 2, 4, 2,
        ]);
        assert!(!has_available_move(dead));

        // Full board with one horizontal pair.
        let row_pair = b([
            2, 2, 4, 8, //
            4, 8, 2, 4, //
            2, 4, 8, 2, //
            4, 2, 4, 8,
        ]);
        assert!(has_available_move(row_pair));

        // Full board whose only pair is vertical; a row-only scan would
        // wrongly report game over here.
        let col_pair = b([
            2, 4, 2, 4, //
            4, 2, 4, 2, //
            2, 4, 2, 8, //
            4, 2, 4, 8,
        ]);
        assert!(has_available_move(col_pair));
    }

    #[test]
    fn it_preserves_the_tile_invariant() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut board = Board::EMPTY
            .with_random_tile(&mut rng)
            .with_random_tile(&mut rng);
        for _ in 0..200 {
            for dir in Move::ALL {
                let r = resolve(board, dir);
                assert!(r
                    .board
                    .tiles()
                    .all(|v| v == 0 || (v >= 2 && v.is_power_of_two())));
                if r.changed {
                    board = spawn_random_tile(r.board, &mut rng);
                }
            }
            if !has_available_move(board) {
                break;
            }
        }
    }
}
