//! Compact representation of boolean rows as lists of the (1-indexed) positions which are `true`.
//!
//! ```
//! use bankdraw::codec;
//!
//! let row = codec::decompress_row(&[3, 5, 6], 6);
//! assert_eq!(row, vec![false, false, true, false, true, true]);
//! assert_eq!(codec::compress_row(&row), vec![3, 5, 6]);
//! ```

use itertools::Itertools;

/// Expand a list of 1-indexed positions into a row of `size` booleans, where exactly the listed
/// positions are `true`.  Positions outside `1..=size` are ignored.
pub fn decompress_row(indices: &[usize], size: usize) -> Vec<bool> {
    let mut row = vec![false; size];
    for &i in indices {
        if (1..=size).contains(&i) {
            row[i - 1] = true;
        }
    }
    row
}

/// Apply [`decompress_row`] to every row independently
pub fn decompress_matrix(rows: &[Vec<usize>], row_size: usize) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|indices| decompress_row(indices, row_size))
        .collect_vec()
}

/// The 1-indexed positions of every `true` in `row`, in ascending order
pub fn compress_row(row: &[bool]) -> Vec<usize> {
    row.iter()
        .positions(|bit| *bit)
        .map(|idx| idx + 1)
        .collect_vec()
}

/// Apply [`compress_row`] to every row independently
pub fn compress_matrix(rows: &[Vec<bool>]) -> Vec<Vec<usize>> {
    rows.iter().map(|row| compress_row(row)).collect_vec()
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn decompress() {
        #[track_caller]
        fn check(indices: &[usize], size: usize, exp: &str) {
            let row = decompress_row(indices, size);
            let row_str = row.iter().map(|b| if *b { '1' } else { '0' }).collect::<String>();
            assert_eq!(row_str, exp);
        }

        check(&[3, 5, 6], 6, "001011");
        check(&[], 4, "0000");
        check(&[1], 1, "1");
        check(&[2, 2], 3, "010");
        check(&[6, 1], 6, "100001");
        // Out of range indices are ignored
        check(&[0, 4, 7, usize::MAX], 6, "000100");
        check(&[1, 2], 0, "");
    }

    #[test]
    fn matrix() {
        let rows = vec![vec![1, 3], vec![], vec![2, 9]];
        assert_eq!(
            decompress_matrix(&rows, 3),
            vec![
                vec![true, false, true],
                vec![false, false, false],
                vec![false, true, false],
            ]
        );
        assert_eq!(
            compress_matrix(&decompress_matrix(&rows, 3)),
            vec![vec![1, 3], vec![], vec![2]]
        );
    }

    #[test]
    fn compress() {
        assert_eq!(compress_row(&[false, false, true, false, true, true]), vec![3, 5, 6]);
        assert_eq!(compress_row(&[]), Vec::<usize>::new());
    }

    #[quickcheck]
    fn compress_then_decompress_is_identity(row: Vec<bool>) -> bool {
        decompress_row(&compress_row(&row), row.len()) == row
    }

    #[quickcheck]
    fn matrix_is_row_wise(rows: Vec<Vec<usize>>, row_size: u8) -> bool {
        let row_size = row_size as usize;
        let matrix = decompress_matrix(&rows, row_size);
        matrix.len() == rows.len()
            && matrix
                .iter()
                .zip_eq(&rows)
                .all(|(m, r)| *m == decompress_row(r, row_size))
    }
}
