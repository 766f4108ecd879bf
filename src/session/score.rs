/// Star rating for a finished exercise run. Step function of the ratio
/// `score / total`: 3 stars only for a perfect run, 2 at 0.7 or better,
/// 1 for anything above zero.
pub fn stars(score: usize, total: usize) -> u8 {
    if total == 0 || score == 0 {
        return 0;
    }
    let ratio = score as f64 / total as f64;
    if ratio >= 1.0 {
        3
    } else if ratio >= 0.7 {
        2
    } else {
        1
    }
}
