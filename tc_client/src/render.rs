//! Plain-text rendering of backend data for the terminal.

use std::fmt::Write;
use tennis_club::{
    auth::UserSummary,
    tournament::{Bracket, DashboardStats, Entrant, Match, Registration, Slot, Tournament},
};

const BYE: &str = "BYE";
const TBD: &str = "TBD";

fn entrant(e: &Entrant) -> String {
    format!("#{} {}", e.seed + 1, e.name)
}

/// "Ana Lopez <ana@example.com> [Instructor]"
pub fn user_badge(user: &UserSummary) -> String {
    format!("{} <{}> [{}]", user.full_name(), user.email, user.role)
}

pub fn tournaments(list: &[Tournament]) -> String {
    if list.is_empty() {
        return "No tournaments yet.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<28} {:<10} {:<12} {}",
        "ID", "Name", "Surface", "Starts", "Status"
    );
    for t in list {
        let starts = t
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<5} {:<28} {:<10} {:<12} {}",
            t.id,
            t.name,
            t.surface,
            starts,
            t.status_or_default().label()
        );
    }
    out
}

pub fn tournament(t: &Tournament) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", t.name, t.id);
    let _ = writeln!(out, "  Surface:  {}", t.surface);
    let _ = writeln!(out, "  Status:   {}", t.status_or_default().label());
    if let Some(start) = t.start_date {
        match t.end_date {
            Some(end) => {
                let _ = writeln!(out, "  Dates:    {} to {}", start, end);
            }
            None => {
                let _ = writeln!(out, "  Starts:   {}", start);
            }
        }
    }
    if let Some(name) = &t.instructor_name {
        let _ = writeln!(out, "  Coach:    {}", name);
    }
    if let Some(max) = t.max_participants {
        let _ = writeln!(out, "  Capacity: {}", max);
    }
    if let Some(description) = t.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\n  {}", description);
    }
    out
}

pub fn registrations(list: &[Registration]) -> String {
    if list.is_empty() {
        return "No registrations yet.\n".to_string();
    }

    let mut out = String::new();
    for r in list {
        let when = r
            .registered_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "{:<5} {:<28} {}", r.id, r.display_name(), when);
    }
    out
}

/// Bracket as one block per round, first round first
///
/// Byes read "name vs BYE", padding positions read "BYE" and later rounds
/// read "TBD vs TBD".
pub fn bracket(title: &str, bracket: &Bracket) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Bracket: {}", title);

    if bracket.is_empty() {
        out.push_str("No registrations yet.\n");
        return out;
    }
    if let Some(only) = bracket.walkover() {
        let _ = writeln!(out, "{} is the only entrant.", only.name);
        return out;
    }

    for round in &bracket.rounds {
        let _ = writeln!(out, "\n== {} ==", round.name);
        for (position, slot) in round.slots.iter().enumerate() {
            let line = match slot {
                Slot::Match { home, away } => format!("{} vs {}", entrant(home), entrant(away)),
                Slot::Bye(e) => format!("{} vs {}", entrant(e), BYE),
                Slot::Vacant => BYE.to_string(),
                Slot::Pending => format!("{} vs {}", TBD, TBD),
            };
            let _ = writeln!(out, "  {:>2}. {}", position + 1, line);
        }
    }
    out
}

pub fn matches(list: &[Match]) -> String {
    if list.is_empty() {
        return "No matches scheduled.\n".to_string();
    }

    let mut out = String::new();
    for m in list {
        let home = m.player1_name.as_deref().unwrap_or("Player");
        let away = m.player2_name.as_deref().unwrap_or("Player");
        let _ = write!(out, "{:<5} {} vs {}", m.id, home, away);
        if let Some(round) = &m.round {
            let _ = write!(out, " ({})", round);
        }
        if let Some(date) = m.date {
            let _ = write!(out, " on {}", date);
        }
        if let Some(score) = &m.score {
            let _ = write!(out, " - {}", score);
        }
        if let Some(winner) = &m.winner_name {
            let _ = write!(out, ", won by {}", winner);
        }
        out.push('\n');
    }
    out
}

/// Dashboard counters; athletes see their own totals
pub fn stats(stats: &DashboardStats, user: Option<&UserSummary>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Active tournaments:   {}", stats.active_tournaments);
    let _ = writeln!(out, "Matches:              {}", stats.total_matches);
    let _ = writeln!(out, "Players:              {}", stats.total_players);
    let _ = writeln!(out, "Pending registrations: {}", stats.pending_inscriptions);
    let _ = writeln!(out, "Participation:        {:.0}%", stats.participation_rate);
    let _ = writeln!(out, "Completion:           {:.0}%", stats.completion_rate);

    if user.is_some_and(|u| !u.role.can_manage_tournaments()) {
        let _ = writeln!(out, "Your tournaments:     {}", stats.user_tournaments);
        let _ = writeln!(out, "Your matches:         {}", stats.user_matches);
    }
    out
}
