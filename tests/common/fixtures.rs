//! Static delimited-text corpora used across harnesses.

/// Comma-separated table with a header row and CRLF line endings.
pub const CSV_CRLF: &str = "id,name,score\r\n1,alice,90\r\n2,bob,85\r\n3,carol,77";

/// Same table with LF line endings.
pub const CSV_LF: &str = "id,name,score\n1,alice,90\n2,bob,85\n3,carol,77";

/// Pipe-separated rows.
pub const PIPE_ROWS: &str = "x|y|z\n1|2|3";

/// A blank line in the middle of the data.
pub const CSV_WITH_BLANK_ROW: &str = "a,b\n\nc,d";

/// A missing field in the middle of a row.
pub const CSV_WITH_BLANK_FIELD: &str = "k1,,v1\nk2,x,v2";

/// Build an `n`-row comma-separated source with `cols` columns per row.
pub fn generated_csv(n: usize, cols: usize) -> String {
    (0..n)
        .map(|row| {
            (0..cols)
                .map(|col| format!("r{row}c{col}"))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
