use crate::machine::Status;
use crate::models::ChecklistSnapshot;
use chrono::{Datelike, NaiveDate, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub pending: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(snapshot: &ChecklistSnapshot) -> Self {
        let statuses = snapshot
            .tasks
            .iter()
            .map(|task| task.status)
            .chain(snapshot.extras.iter().map(|extra| extra.status));

        let mut progress = Progress {
            done: 0,
            pending: 0,
            total: 0,
        };
        for status in statuses {
            progress.total += 1;
            match status {
                Status::Done => progress.done += 1,
                Status::Pending => progress.pending += 1,
                Status::Todo => {}
            }
        }
        progress
    }

    pub fn percent(&self) -> u32 {
        percent(self.done as u32, self.total as u32)
    }
}

pub fn percent(done: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(done) / f64::from(total) * 100.0).round() as u32
}

pub fn fill_class(percent: u32) -> &'static str {
    if percent >= 80 {
        "good"
    } else if percent >= 50 {
        "warning"
    } else {
        "danger"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyBand {
    Green,
    Yellow,
    Orange,
    Red,
}

impl MoneyBand {
    pub fn for_percent(percent: u32) -> Self {
        if percent >= 100 {
            MoneyBand::Green
        } else if percent >= 70 {
            MoneyBand::Yellow
        } else if percent >= 40 {
            MoneyBand::Orange
        } else {
            MoneyBand::Red
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            MoneyBand::Green => "green",
            MoneyBand::Yellow => "yellow",
            MoneyBand::Orange => "orange",
            MoneyBand::Red => "red",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            MoneyBand::Green => "🟢",
            MoneyBand::Yellow => "🟡",
            MoneyBand::Orange => "🟠",
            MoneyBand::Red => "🔴",
        }
    }
}

/// `Monday, 5.01`
pub fn weekday_date(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date.weekday()), short_date(date))
}

/// `5.01`
pub fn short_date(date: NaiveDate) -> String {
    format!("{}.{:02}", date.day(), date.month())
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Extra, Group, Task};

    fn task(key: &str, status: Status) -> Task {
        Task {
            key: key.to_string(),
            label: key.to_string(),
            group: Group::Morning,
            status,
        }
    }

    #[test]
    fn progress_counts_tasks_and_extras() {
        let snapshot = ChecklistSnapshot {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            is_sunday: false,
            tasks: vec![
                task("bed", Status::Done),
                task("teeth", Status::Pending),
                task("shower", Status::Todo),
            ],
            extras: vec![Extra {
                id: 7,
                title: "Dishes".to_string(),
                points: 2,
                status: Status::Done,
            }],
        };

        let progress = Progress::of(&snapshot);
        assert_eq!(progress, Progress { done: 2, pending: 1, total: 4 });
        assert_eq!(progress.percent(), 50);
    }

    #[test]
    fn percent_rounds_and_handles_empty() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 3), 33);
    }

    #[test]
    fn money_bands_follow_thresholds() {
        assert_eq!(MoneyBand::for_percent(100), MoneyBand::Green);
        assert_eq!(MoneyBand::for_percent(99), MoneyBand::Yellow);
        assert_eq!(MoneyBand::for_percent(40), MoneyBand::Orange);
        assert_eq!(MoneyBand::for_percent(39).class(), "red");
        assert_eq!(fill_class(80), "good");
        assert_eq!(fill_class(79), "warning");
        assert_eq!(fill_class(10), "danger");
    }

    #[test]
    fn dates_use_day_dot_month() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(weekday_date(date), "Monday, 5.01");
        assert_eq!(short_date(date), "5.01");
    }
}
