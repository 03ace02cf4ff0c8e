//! Text rendering of the board

use hexgame_core::Board;

/// Row `i` is indented by `i` spaces, cells are separated by single spaces,
/// and a blank line follows the last row.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for x in 0..board.size() {
        out.push_str(&" ".repeat(x));
        let marks: Vec<String> = board.row(x).iter().map(|c| c.mark().to_string()).collect();
        out.push_str(&marks.join(" "));
        out.push('\n');
    }
    out.push('\n');
    out
}
