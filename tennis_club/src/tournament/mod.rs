//! Tournament models and the single-elimination bracket generator.
//!
//! ## Example
//!
//! ```
//! use tennis_club::tournament::{bracket, Registration};
//!
//! let registrations: Vec<Registration> = serde_json::from_str(r#"[
//!     {"id": 1, "torneo_id": 1, "deportista_id": 10,
//!      "deportista_nombre": "Ana Lopez", "fecha_inscripcion": "2024-05-01T10:00:00"},
//!     {"id": 2, "torneo_id": 1, "deportista_id": 11,
//!      "deportista_nombre": "Eva Ruiz", "fecha_inscripcion": "2024-05-01T09:00:00"},
//!     {"id": 3, "torneo_id": 1, "deportista_id": 12,
//!      "deportista_nombre": "Sara Gil", "fecha_inscripcion": "2024-05-01T11:00:00"}
//! ]"#).unwrap();
//!
//! let bracket = bracket::generate(&registrations);
//! assert_eq!(bracket.round_count(), 2);
//! assert_eq!(bracket.seeds[0].name, "Eva Ruiz");
//! ```

pub mod bracket;
pub mod models;

pub use bracket::{Bracket, Entrant, Round, RoundName, Slot};
pub use models::{
    DashboardStats, Match, MatchId, MatchStatus, NewMatch, NewRegistration, Registration,
    RegistrationId, RegistrationStatus, Tournament, TournamentDraft, TournamentId, TournamentKind,
    TournamentStatus,
};
