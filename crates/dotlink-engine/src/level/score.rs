/// Score band for a won level, by how much of the countdown was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreBand {
    Low,
    Fair,
    Good,
    Perfect,
}

impl ScoreBand {
    /// `elapsed ≤ 25%` of the initial time scores top, `≤ 50%` second,
    /// `≤ 75%` third, anything slower lowest.
    pub fn from_elapsed(elapsed: u32, initial_time: u32) -> Self {
        let (e, t) = (elapsed as u64, initial_time as u64);
        if e * 4 <= t {
            ScoreBand::Perfect
        } else if e * 2 <= t {
            ScoreBand::Good
        } else if e * 4 <= 3 * t {
            ScoreBand::Fair
        } else {
            ScoreBand::Low
        }
    }

    pub fn points(self) -> u32 {
        match self {
            ScoreBand::Perfect => 100,
            ScoreBand::Good => 75,
            ScoreBand::Fair => 50,
            ScoreBand::Low => 25,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Perfect => "Congratulations! You won with a perfect score of 100!",
            ScoreBand::Good => "Great job! You won with a score of 75!",
            ScoreBand::Fair => "Well done! You won with a score of 50!",
            ScoreBand::Low => "You won with a score of 25!",
        }
    }
}
