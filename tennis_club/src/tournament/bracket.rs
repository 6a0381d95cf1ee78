//! Single-elimination bracket layout.
//!
//! [`generate`] seeds registrations by registration time and lays out an
//! empty bracket: round 0 holds the first-round pairings, later rounds are
//! placeholders that a results flow fills in. Nothing is simulated.

use super::models::{Registration, RegistrationId};
use std::fmt;

/// A seeded competitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrant {
    /// 0-based seed, lower registered earlier
    pub seed: usize,
    pub registration_id: RegistrationId,
    pub name: String,
}

/// One position of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Two seeded competitors meet
    Match { home: Entrant, away: Entrant },
    /// Competitor advances without playing
    Bye(Entrant),
    /// Padding beyond the last competitor in round 0 (an empty bye)
    Vacant,
    /// Filled in once earlier results are known
    Pending,
}

impl Slot {
    /// Competitors placed in this slot
    pub fn entrants(&self) -> Vec<&Entrant> {
        match self {
            Slot::Match { home, away } => vec![home, away],
            Slot::Bye(entrant) => vec![entrant],
            Slot::Vacant | Slot::Pending => Vec::new(),
        }
    }

    /// Only `Match` slots are played
    pub fn is_playable(&self) -> bool {
        matches!(self, Slot::Match { .. })
    }
}

/// Label of a round, by distance from the final
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundName {
    Final,
    Semifinals,
    Quarterfinals,
    /// 1-based round number counted from the first round
    Round(usize),
}

impl RoundName {
    pub fn for_round(index: usize, total_rounds: usize) -> Self {
        match total_rounds.saturating_sub(index + 1) {
            0 => RoundName::Final,
            1 => RoundName::Semifinals,
            2 => RoundName::Quarterfinals,
            _ => RoundName::Round(index + 1),
        }
    }
}

impl fmt::Display for RoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundName::Final => f.write_str("Final"),
            RoundName::Semifinals => f.write_str("Semifinals"),
            RoundName::Quarterfinals => f.write_str("Quarterfinals"),
            RoundName::Round(k) => write!(f, "Round {k}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub index: usize,
    pub name: RoundName,
    pub slots: Vec<Slot>,
}

/// Derived bracket view, recomputed on every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bracket {
    /// Every competitor in seed order
    pub seeds: Vec<Entrant>,
    pub rounds: Vec<Round>,
}

impl Bracket {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// The lone competitor of a one-entry bracket, which has no rounds
    pub fn walkover(&self) -> Option<&Entrant> {
        match (self.seeds.as_slice(), self.rounds.is_empty()) {
            ([only], true) => Some(only),
            _ => None,
        }
    }

    /// Competitors receiving a first-round bye
    pub fn byes(&self) -> impl Iterator<Item = &Entrant> {
        self.rounds
            .first()
            .into_iter()
            .flat_map(|round| round.slots.iter())
            .filter_map(|slot| match slot {
                Slot::Bye(entrant) => Some(entrant),
                _ => None,
            })
    }
}

/// `ceil(log2(n))`, zero for `n <= 1`
pub fn round_count(entrants: usize) -> usize {
    if entrants == 0 {
        return 0;
    }
    entrants.next_power_of_two().trailing_zeros() as usize
}

/// Lay out a single-elimination bracket
///
/// Registrations are seeded by ascending registration time; the sort is
/// stable so equal timestamps keep their input order, and entries without a
/// timestamp come first. Round `r` has `2^(R - r)` slots where
/// `R = ceil(log2(N))`. Seeds are paired two at a time into round 0; an odd
/// competitor out gets a bye and the remaining positions are `Vacant`.
///
/// A single registration yields zero rounds; the competitor is still listed
/// in [`Bracket::seeds`] and reported by [`Bracket::walkover`].
///
/// # Example
///
/// ```
/// use tennis_club::tournament::bracket::generate;
///
/// let bracket = generate(&[]);
/// assert!(bracket.rounds.is_empty());
/// ```
pub fn generate(registrations: &[Registration]) -> Bracket {
    let mut ordered: Vec<&Registration> = registrations.iter().collect();
    ordered.sort_by_key(|r| r.registered_at);

    let seeds: Vec<Entrant> = ordered
        .into_iter()
        .enumerate()
        .map(|(seed, r)| Entrant {
            seed,
            registration_id: r.id,
            name: r.display_name().to_string(),
        })
        .collect();

    let total_rounds = round_count(seeds.len());
    let rounds = (0..total_rounds)
        .map(|index| {
            let width = 1usize << (total_rounds - index);
            let slots = if index == 0 {
                first_round(&seeds, width)
            } else {
                vec![Slot::Pending; width]
            };
            Round {
                index,
                name: RoundName::for_round(index, total_rounds),
                slots,
            }
        })
        .collect();

    log::debug!(
        "Generated bracket: {} entrants, {} rounds",
        seeds.len(),
        total_rounds
    );

    Bracket { seeds, rounds }
}

fn first_round(seeds: &[Entrant], width: usize) -> Vec<Slot> {
    let mut slots: Vec<Slot> = seeds
        .chunks(2)
        .map(|pair| match pair {
            [home, away] => Slot::Match {
                home: home.clone(),
                away: away.clone(),
            },
            [single] => Slot::Bye(single.clone()),
            _ => Slot::Vacant,
        })
        .collect();
    slots.resize(width, Slot::Vacant);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn registration(id: i64, name: &str, minute: u32) -> Registration {
        Registration {
            id,
            tournament_id: 1,
            athlete_id: id + 100,
            athlete_name: Some(name.to_string()),
            registered_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(10, minute, 0),
            status: None,
        }
    }

    fn field(n: usize) -> Vec<Registration> {
        (0..n)
            .map(|i| registration(i as i64, &format!("P{i}"), i as u32))
            .collect()
    }

    #[test]
    fn test_round_count() {
        assert_eq!(round_count(0), 0);
        assert_eq!(round_count(1), 0);
        assert_eq!(round_count(2), 1);
        assert_eq!(round_count(3), 2);
        assert_eq!(round_count(4), 2);
        assert_eq!(round_count(5), 3);
        assert_eq!(round_count(8), 3);
        assert_eq!(round_count(9), 4);
    }

    #[test]
    fn test_empty_bracket() {
        let bracket = generate(&[]);
        assert!(bracket.is_empty());
        assert_eq!(bracket.round_count(), 0);
        assert!(bracket.walkover().is_none());
    }

    #[test]
    fn test_single_entrant_is_walkover() {
        let bracket = generate(&field(1));
        assert_eq!(bracket.round_count(), 0);
        assert_eq!(bracket.seeds.len(), 1);
        assert_eq!(bracket.walkover().map(|e| e.name.as_str()), Some("P0"));
    }

    #[test]
    fn test_two_entrants_play_the_final() {
        let bracket = generate(&field(2));
        assert_eq!(bracket.round_count(), 1);
        assert_eq!(bracket.rounds[0].name, RoundName::Final);
        assert_eq!(bracket.rounds[0].slots.len(), 2);
        assert!(bracket.rounds[0].slots[0].is_playable());
        assert_eq!(bracket.rounds[0].slots[1], Slot::Vacant);
    }

    #[test]
    fn test_five_entrants_layout() {
        let bracket = generate(&field(5));
        assert_eq!(bracket.round_count(), 3);

        let first = &bracket.rounds[0];
        assert_eq!(first.slots.len(), 8);
        assert!(matches!(&first.slots[0], Slot::Match { home, away } if home.seed == 0 && away.seed == 1));
        assert!(matches!(&first.slots[1], Slot::Match { home, away } if home.seed == 2 && away.seed == 3));
        assert!(matches!(&first.slots[2], Slot::Bye(e) if e.seed == 4));
        assert!(first.slots[3..].iter().all(|s| *s == Slot::Vacant));

        assert_eq!(bracket.rounds[1].slots.len(), 4);
        assert_eq!(bracket.rounds[2].slots.len(), 2);
        assert!(bracket.rounds[1..]
            .iter()
            .all(|r| r.slots.iter().all(|s| *s == Slot::Pending)));

        let byes: Vec<_> = bracket.byes().map(|e| e.name.as_str()).collect();
        assert_eq!(byes, vec!["P4"]);
    }

    #[test]
    fn test_seeding_by_registration_time() {
        let registrations = vec![
            registration(1, "Late", 50),
            registration(2, "Early", 5),
            registration(3, "Middle", 20),
        ];

        let bracket = generate(&registrations);
        let names: Vec<_> = bracket.seeds.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Early", "Middle", "Late"]);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let registrations = vec![
            registration(1, "B", 10),
            registration(2, "A", 10),
            registration(3, "C", 0),
        ];

        let bracket = generate(&registrations);
        let names: Vec<_> = bracket.seeds.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_missing_timestamp_seeds_first() {
        let mut undated = registration(9, "Undated", 0);
        undated.registered_at = None;
        let registrations = vec![registration(1, "Dated", 0), undated];

        let bracket = generate(&registrations);
        assert_eq!(bracket.seeds[0].name, "Undated");
    }

    #[test]
    fn test_round_names() {
        assert_eq!(RoundName::for_round(0, 1), RoundName::Final);
        assert_eq!(RoundName::for_round(0, 2), RoundName::Semifinals);
        assert_eq!(RoundName::for_round(0, 3), RoundName::Quarterfinals);
        assert_eq!(RoundName::for_round(0, 5), RoundName::Round(1));
        assert_eq!(RoundName::for_round(1, 5), RoundName::Round(2));
        assert_eq!(RoundName::for_round(2, 5), RoundName::Quarterfinals);
        assert_eq!(RoundName::for_round(4, 5), RoundName::Final);
        assert_eq!(RoundName::Round(2).to_string(), "Round 2");
        assert_eq!(RoundName::Semifinals.to_string(), "Semifinals");
    }
}
