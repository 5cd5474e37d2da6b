//! Console presentation of weekly outcomes, season reports and leaderboards.

use accuracy_engine::{
    Direction, GroupWeekStatus, HitCounts, LeaderRow, LeaderboardMode, LoveHateWeekOutcome,
    SeasonReport, WeekOutcome, WeekRange,
};
use colored::*;
use player_registry::PositionGroup;

fn dashed(color: Color) -> String {
    "-".repeat(100).color(color).to_string()
}

fn plural(group: PositionGroup) -> ColoredString {
    format!("{group}s").yellow()
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}%"))
}

fn coefficient(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |c| format!("{c:.4}"))
}

/// One week: accuracy per group, then love/hate
pub fn week_outcome(outcome: &WeekOutcome, show_players: bool) {
    println!("\n\n{}\n", dashed(Color::Magenta));
    println!("{}", format!("Week {}", outcome.week).bold());

    for group_outcome in &outcome.groups {
        match &group_outcome.status {
            GroupWeekStatus::Scored(score) => {
                println!(
                    "\nResults for {} in week {} (# players = {}):",
                    plural(group_outcome.group),
                    outcome.week,
                    score.common_count()
                );
                println!("\tCoefficient: {}", coefficient(score.coefficient).green());
                let difference = format!("{:.4}", score.avg_difference);
                println!("\tAverage difference: {}", difference.green());
            }
            GroupWeekStatus::MissingRankings => {
                println!(
                    "\nNo rankings file found for {} in week {}...skipping.",
                    plural(group_outcome.group),
                    outcome.week
                );
            }
            GroupWeekStatus::Failed(e) => {
                let message =
                    format!("Skipped {}s in week {}: {}", group_outcome.group, outcome.week, e);
                println!("\n{}", message.red());
            }
        }
    }

    if let Some(love_hate) = &outcome.love_hate {
        love_hate_week(outcome.week, love_hate, show_players);
    }
}

fn hit_line(counts: &HitCounts, label: &str) -> String {
    format!(
        "hit on {} (out of {}) {} loves and {} (out of {}) hates ({} correct in total)",
        counts.love_correct.to_string().green(),
        counts.love_total.to_string().red(),
        label.yellow(),
        counts.hate_correct.to_string().green(),
        counts.hate_total.to_string().red(),
        percent(counts.overall_pct()).green()
    )
}

fn love_hate_week(week: u32, outcome: &LoveHateWeekOutcome, show_players: bool) {
    println!("\n\nLove/hate results for week {week}:\n");

    if show_players {
        let mut current: Option<(PositionGroup, Direction)> = None;
        for call in &outcome.scored {
            if current.map(|(g, _)| g) != Some(call.group) {
                println!("{}:", call.group.to_string().yellow());
            }
            if current != Some((call.group, call.direction)) {
                println!("\t{}:", call.direction);
            }
            current = Some((call.group, call.direction));

            let line = format!(
                "\t\t{}: {} pts ({} percentile)",
                call.name, call.points, call.percentile
            );
            println!("{}", if call.correct { line.green() } else { line.red() });
        }
        for skipped in &outcome.skipped {
            let call = &skipped.call;
            let line =
                format!("\t{} ({} {}): {}", call.name, call.group, call.direction, skipped.reason);
            println!("{}", line.yellow());
        }
        println!();
    }

    for (group, counts) in &outcome.by_group {
        if !counts.is_empty() {
            println!("\t{}", hit_line(counts, group.as_str()));
        }
    }

    let totals = &outcome.totals;
    println!();
    println!(
        "\tIn total, hit on {} loves out of {} ({})",
        totals.love_correct.to_string().green(),
        totals.love_total.to_string().red(),
        percent(totals.love_pct()).green()
    );
    println!(
        "\tIn total, hit on {} hates out of {} ({})",
        totals.hate_correct.to_string().green(),
        totals.hate_total.to_string().red(),
        percent(totals.hate_pct()).green()
    );
}

/// Season summary after every week has been processed
pub fn season_report(report: &SeasonReport, range: WeekRange) {
    println!("\n\n{}\n", dashed(Color::Green));
    println!("{}", format!("Cumulative results for {range}").bold());

    for summary in &report.groups {
        println!("\n{} ({} weeks scored):", plural(summary.group), summary.weeks_scored);
        println!("\tAverage coefficient: {}", coefficient(summary.average_coefficient).green());
        let difference = summary
            .average_of_average_differences
            .map_or_else(|| "n/a".to_string(), |d| format!("{d:.4}"));
        println!("\tAverage difference: {}", difference.green());

        if !summary.most_predictable.is_empty() {
            println!("\tMost predictable:");
            for (i, entity) in summary.most_predictable.iter().enumerate() {
                println!(
                    "\t\t{}) {} ({:.2} avg rank difference)",
                    i + 1,
                    entity.name,
                    entity.average_delta
                );
            }
        }
        if !summary.least_predictable.is_empty() {
            println!("\tLeast predictable:");
            for (i, entity) in summary.least_predictable.iter().enumerate() {
                println!(
                    "\t\t{}) {} ({:.2} avg rank difference)",
                    i + 1,
                    entity.name,
                    entity.average_delta
                );
            }
        }
    }

    if !report.predictability.is_empty() {
        println!("\nPosition groups from most to least predictable:");
        for (i, (group, avg)) in report.predictability.iter().enumerate() {
            println!("\t{}) {} ({:.4})", i + 1, plural(*group), avg);
        }
    }

    if !report.love_hate_totals.is_empty() {
        println!("\nLove/hate for {range}:");
        for (group, counts) in &report.love_hate_by_group {
            println!("\t{}", hit_line(counts, group.as_str()));
        }
        println!("\t{}", hit_line(&report.love_hate_totals, "overall"));
    }
}

/// Points leaders for one group
pub fn leaderboard(
    group: PositionGroup,
    mode: LeaderboardMode,
    range: WeekRange,
    rows: &[LeaderRow],
) {
    let title = match mode {
        LeaderboardMode::Cumulative => "total points",
        LeaderboardMode::PerGame => "points per game",
    };
    println!("\n{} by {} ({}):", plural(group), title, range);

    for (i, row) in rows.iter().enumerate() {
        match mode {
            LeaderboardMode::Cumulative => {
                println!("\t{}) {} -> {:.2} pts", i + 1, row.name, row.value)
            }
            LeaderboardMode::PerGame => println!(
                "\t{}) {} -> {:.2} average pts ({} games)",
                i + 1,
                row.name,
                row.value,
                row.games
            ),
        }
    }
    println!("{}", dashed(Color::Green));
}
