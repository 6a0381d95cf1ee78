//! Tournament data models as served by the backend.

use crate::auth::UserId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Tournament ID type
pub type TournamentId = i64;

/// Registration ID type
pub type RegistrationId = i64;

/// Match ID type
pub type MatchId = i64;

/// Tournament state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStatus {
    /// Accepting registrations
    #[serde(rename = "planificado")]
    Planned,
    /// Being played
    #[serde(rename = "en_curso")]
    InProgress,
    /// Finished
    #[serde(rename = "finalizado")]
    Finished,
}

impl TournamentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TournamentStatus::Planned => "Planned",
            TournamentStatus::InProgress => "In progress",
            TournamentStatus::Finished => "Finished",
        }
    }
}

/// Tournament entry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentKind {
    /// Any athlete may register
    #[serde(rename = "abierto")]
    Open,
    /// Only the instructor registers athletes
    #[serde(rename = "cerrado")]
    Closed,
}

/// Tournament information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "superficie")]
    pub surface: String,
    #[serde(rename = "fecha_inicio", default)]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fecha_fin", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "tipo")]
    pub kind: TournamentKind,
    #[serde(rename = "estado", default)]
    pub status: Option<TournamentStatus>,
    #[serde(rename = "profesor_id", default)]
    pub instructor_id: Option<UserId>,
    #[serde(rename = "profesor_nombre", default)]
    pub instructor_name: Option<String>,
    #[serde(rename = "max_participantes", default)]
    pub max_participants: Option<u32>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Tournament {
    /// Status shown when the backend omits it
    pub fn status_or_default(&self) -> TournamentStatus {
        self.status.unwrap_or(TournamentStatus::Planned)
    }
}

/// Body for creating or updating a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "superficie")]
    pub surface: String,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_fin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "tipo")]
    pub kind: TournamentKind,
    #[serde(rename = "max_participantes", skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TournamentDraft {
    pub fn new(name: String, surface: String, start_date: NaiveDate, kind: TournamentKind) -> Self {
        Self {
            name,
            surface,
            start_date,
            end_date: None,
            kind,
            max_participants: None,
            description: None,
        }
    }
}

/// Registration review state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aceptada")]
    Accepted,
    #[serde(rename = "rechazada")]
    Rejected,
}

/// A competitor's entry into a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    #[serde(rename = "torneo_id")]
    pub tournament_id: TournamentId,
    #[serde(rename = "deportista_id")]
    pub athlete_id: UserId,
    #[serde(rename = "deportista_nombre", default)]
    pub athlete_name: Option<String>,
    #[serde(rename = "fecha_inscripcion", default)]
    pub registered_at: Option<NaiveDateTime>,
    #[serde(rename = "estado", default)]
    pub status: Option<RegistrationStatus>,
}

impl Registration {
    /// Competitor name, or "Player" when the backend has none
    pub fn display_name(&self) -> &str {
        self.athlete_name.as_deref().unwrap_or("Player")
    }
}

/// Body for registering an athlete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRegistration {
    #[serde(rename = "torneo_id")]
    pub tournament_id: TournamentId,
    /// Omitted for self-registration
    #[serde(rename = "deportista_id", skip_serializing_if = "Option::is_none")]
    pub athlete_id: Option<UserId>,
}

/// Match state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "programado")]
    Scheduled,
    #[serde(rename = "en_curso")]
    InProgress,
    #[serde(rename = "finalizado")]
    Finished,
}

/// A match between two athletes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    #[serde(rename = "torneo_id")]
    pub tournament_id: TournamentId,
    #[serde(rename = "deportista1_id")]
    pub player1_id: UserId,
    #[serde(rename = "deportista2_id")]
    pub player2_id: UserId,
    #[serde(rename = "deportista1_nombre", default)]
    pub player1_name: Option<String>,
    #[serde(rename = "deportista2_nombre", default)]
    pub player2_name: Option<String>,
    #[serde(rename = "ganador_id", default)]
    pub winner_id: Option<UserId>,
    #[serde(rename = "ganador_nombre", default)]
    pub winner_name: Option<String>,
    #[serde(rename = "resultado", default)]
    pub score: Option<String>,
    #[serde(rename = "fecha_partido", default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "ronda", default)]
    pub round: Option<String>,
    #[serde(rename = "numero_ronda", default)]
    pub round_number: Option<u32>,
    #[serde(rename = "posicion_cuadro", default)]
    pub bracket_position: Option<u32>,
    #[serde(rename = "estado", default)]
    pub status: Option<MatchStatus>,
}

/// Body for scheduling a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    #[serde(rename = "torneo_id")]
    pub tournament_id: TournamentId,
    #[serde(rename = "deportista1_id")]
    pub player1_id: UserId,
    #[serde(rename = "deportista2_id")]
    pub player2_id: UserId,
    #[serde(rename = "fecha_partido", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "ronda", skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
}

/// Dashboard counters; missing fields read as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub active_tournaments: u64,
    pub total_matches: u64,
    pub participation_rate: f64,
    pub total_players: u64,
    pub pending_inscriptions: u64,
    pub completion_rate: f64,
    pub avg_match_duration: f64,
    pub user_tournaments: u64,
    pub user_matches: u64,
}
