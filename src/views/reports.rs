use super::back_row;
use crate::errors::AppError;
use crate::models::{History, HistoryWeek, ReportDay, WeeklyReport};
use crate::router::RouteParams;
use crate::state::AppState;
use crate::stats::MoneyBand;
use crate::ui::Element;

pub async fn render_report(state: AppState, params: RouteParams) -> Result<Vec<Element>, AppError> {
    let child_id = params.require_child()?;
    let report = state.client.report(child_id).await?;
    Ok(build_report(&report))
}

pub fn build_report(report: &WeeklyReport) -> Vec<Element> {
    let has_extra = report.extra_total > 0;
    let range = match (report.days.first(), report.days.last()) {
        (Some(first), Some(last)) => format!("{} - {}", first.display, last.display),
        _ => String::new(),
    };

    let mut header = Element::row().class("table-header").children([
        Element::text("Day"),
        Element::text("Points"),
    ]);
    if has_extra {
        header = header.child(Element::text("Bonus"));
    }

    let mut table = Element::card().key("report-table").child(header);
    table = table.children(report.days.iter().map(|day| day_row(day, report.max_daily, has_extra)));

    let mut subtotal = Element::row().class("total-row").children([
        Element::text("Sum"),
        Element::text(report.subtotal.to_string()),
    ]);
    if has_extra {
        subtotal = subtotal.child(Element::text(format!("+{}", report.extra_total)));
    }
    table = table.child(subtotal);
    if report.penalty != 0 {
        table = table.child(Element::text(format!("Penalty (Sunday chores): -{}", report.penalty)).class("penalty"));
    }
    table = table.child(Element::row().class("total-row").children([
        Element::text("Total"),
        Element::text(report.total.to_string()),
    ]));

    vec![
        back_row(),
        Element::header(format!("📊 Report: {}", report.child_name)).child(Element::subtitle(range)),
        money_card(report.money_percent),
        table,
    ]
}

fn day_row(day: &ReportDay, max_daily: u32, has_extra: bool) -> Element {
    let mut row = Element::row().children([
        Element::text(format!("{} {}", day.weekday, day.display)),
        Element::text(format!("{}/{max_daily}", day.points)),
    ]);
    if has_extra {
        let extra = if day.extra > 0 {
            day.extra.to_string()
        } else {
            "-".to_string()
        };
        row = row.child(Element::text(extra));
    }
    row
}

fn money_card(percent: u32) -> Element {
    let band = MoneyBand::for_percent(percent);
    Element::card().class("text-center").children([
        Element::text(format!("{} {percent}%", band.marker()))
            .class("money-badge")
            .class(band.class()),
        Element::text("of pocket money").class("score-label"),
    ])
}

pub async fn render_history(state: AppState, params: RouteParams) -> Result<Vec<Element>, AppError> {
    let child_id = params.require_child()?;
    let history = state.client.history(child_id).await?;
    Ok(build_history(&history))
}

pub fn build_history(history: &History) -> Vec<Element> {
    let mut view = vec![
        back_row(),
        Element::header(format!("📜 History: {}", history.child_name)),
    ];
    if history.weeks.is_empty() {
        view.push(Element::empty_state("📭", "No data yet"));
        return view;
    }
    view.extend(history.weeks.iter().map(week_card));
    view
}

fn week_card(week: &HistoryWeek) -> Element {
    let band = MoneyBand::for_percent(week.money_percent);
    let total = if week.extra_total > 0 {
        format!("{} + {} bonus", week.total, week.extra_total)
    } else {
        week.total.to_string()
    };

    let mut card = Element::card()
        .child(Element::row().children([
            Element::text(format!("{} - {}", week.start_display, week.end_display)),
            Element::text(format!("{} {}%", band.marker(), week.money_percent))
                .class("money-badge")
                .class(band.class()),
        ]))
        .children(week.days.iter().map(|day| day_row(day, week.max_daily, false)))
        .child(Element::row().class("total-row").children([
            Element::text("Total"),
            Element::text(total),
        ]));
    if week.penalty != 0 {
        card = card.child(Element::text(format!("Penalty: -{}", week.penalty)).class("text-hint"));
    }
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Container;
    use chrono::NaiveDate;

    fn day(date: u32, weekday: &str, points: u32, extra: u32) -> ReportDay {
        ReportDay {
            date: NaiveDate::from_ymd_opt(2026, 1, date).unwrap(),
            weekday: weekday.to_string(),
            display: format!("{date:02}.01"),
            points,
            extra,
        }
    }

    fn report(extra_total: u32, penalty: i64) -> WeeklyReport {
        WeeklyReport {
            child_name: "Alan".to_string(),
            start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
            days: vec![day(5, "Mon", 8, extra_total), day(6, "Tue", 6, 0)],
            subtotal: 14,
            penalty,
            total: 14 - penalty,
            extra_total,
            money_percent: 75,
            max_daily: 9,
        }
    }

    #[test]
    fn report_without_bonus_has_two_columns() {
        let mut container = Container::new();
        container.mount(build_report(&report(0, 0)));
        let text = container.to_text();
        assert!(text.contains("05.01 - 06.01"));
        assert!(text.contains("🟡 75%"));
        assert!(text.contains("Mon 05.01 | 8/9\n"));
        assert!(text.contains("Total | 14"));
        assert!(!text.contains("Bonus"));
        assert!(!text.contains("Penalty"));
    }

    #[test]
    fn report_with_bonus_and_penalty() {
        let mut container = Container::new();
        container.mount(build_report(&report(3, 5)));
        let text = container.to_text();
        assert!(text.contains("Day | Points | Bonus"));
        assert!(text.contains("Mon 05.01 | 8/9 | 3"));
        assert!(text.contains("Tue 06.01 | 6/9 | -"));
        assert!(text.contains("Sum | 14 | +3"));
        assert!(text.contains("Penalty (Sunday chores): -5"));
        assert!(text.contains("Total | 9"));
    }

    #[test]
    fn empty_history_says_so() {
        let mut container = Container::new();
        container.mount(build_history(&History {
            child_name: "Alan".to_string(),
            weeks: Vec::new(),
        }));
        assert!(container.to_text().contains("📭 No data yet"));
    }

    #[test]
    fn history_week_totals_include_bonus() {
        let history = History {
            child_name: "Alan".to_string(),
            weeks: vec![HistoryWeek {
                start_display: "29.12".to_string(),
                end_display: "04.01".to_string(),
                days: vec![day(1, "Thu", 9, 0)],
                total: 60,
                penalty: 0,
                extra_total: 4,
                money_percent: 100,
                max_daily: 9,
            }],
        };
        let mut container = Container::new();
        container.mount(build_history(&history));
        let text = container.to_text();
        assert!(text.contains("29.12 - 04.01 | 🟢 100%"));
        assert!(text.contains("Total | 60 + 4 bonus"));
    }
}
