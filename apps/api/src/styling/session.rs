//! Try-on session — the per-view state machine `input → avatar → result`.
//!
//! Every generation is tagged with an id. Starting a new generation or
//! picking a new asset bumps the id, so a slower, superseded request can
//! never overwrite newer state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::assets::ImageAsset;
use crate::styling::assembler::{TryOnResult, TryOnView};
use crate::styling::dispatcher::TryOnInputs;
use crate::styling::models::{Measurements, Occasion, SkinTone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Input,
    Avatar,
    Result,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Generation needs both a face and a garment image (face present: {face}, garment present: {garment})")]
    MissingAssets { face: bool, garment: bool },
}

/// Handed out when a generation starts; must be presented to complete it.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub generation_id: u64,
    pub inputs: TryOnInputs,
}

#[derive(Debug, Clone)]
pub struct TryOnSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    last_touched: DateTime<Utc>,
    face: Option<ImageAsset>,
    garment: Option<ImageAsset>,
    pub measurements: Measurements,
    pub skin_tone: SkinTone,
    pub occasion: Occasion,
    phase: Phase,
    generation_id: u64,
    result: Option<TryOnResult>,
}

impl TryOnSession {
    pub fn new(measurements: Measurements, skin_tone: SkinTone) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_touched: now,
            face: None,
            garment: None,
            measurements,
            skin_tone,
            occasion: Occasion::default(),
            phase: Phase::Input,
            generation_id: 0,
            result: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&TryOnResult> {
        self.result.as_ref()
    }

    fn touch(&mut self) {
        self.last_touched = Utc::now();
    }

    fn idle_longer_than(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_touched)
            .to_std()
            .is_ok_and(|idle| idle > ttl)
    }

    pub fn set_face(&mut self, face: ImageAsset) {
        self.face = Some(face);
        self.reset_to_input();
    }

    pub fn set_garment(&mut self, garment: ImageAsset) {
        self.garment = Some(garment);
        self.reset_to_input();
    }

    /// A new input invalidates the current result and any in-flight generation.
    fn reset_to_input(&mut self) {
        self.result = None;
        self.generation_id += 1;
        self.phase = Phase::Input;
    }

    /// `input|result|avatar → avatar`. Refused unless both assets are present.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, SessionError> {
        let (face, garment) = match (&self.face, &self.garment) {
            (Some(face), Some(garment)) => (face.clone(), garment.clone()),
            (face, garment) => {
                return Err(SessionError::MissingAssets {
                    face: face.is_some(),
                    garment: garment.is_some(),
                })
            }
        };

        self.generation_id += 1;
        self.phase = Phase::Avatar;
        self.result = None;

        Ok(GenerationTicket {
            generation_id: self.generation_id,
            inputs: TryOnInputs {
                face,
                garment,
                measurements: self.measurements.clone(),
                skin_tone: self.skin_tone,
                occasion: self.occasion,
            },
        })
    }

    /// `avatar → result`. Returns false, leaving state untouched, when the
    /// ticket belongs to a superseded generation.
    pub fn complete_generation(&mut self, generation_id: u64, result: TryOnResult) -> bool {
        if generation_id != self.generation_id || self.phase != Phase::Avatar {
            return false;
        }
        self.result = Some(result);
        self.phase = Phase::Result;
        true
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            phase: self.phase,
            is_generating: self.phase == Phase::Avatar,
            face_image: self.face.clone(),
            garment_image: self.garment.clone(),
            measurements: self.measurements.clone(),
            skin_tone: self.skin_tone,
            occasion: self.occasion,
            result: self.result().map(TryOnView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub is_generating: bool,
    pub face_image: Option<ImageAsset>,
    pub garment_image: Option<ImageAsset>,
    pub measurements: Measurements,
    pub skin_tone: SkinTone,
    pub occasion: Occasion,
    pub result: Option<TryOnView>,
}

/// In-memory sessions, one per open try-on view. Nothing is persisted.
///
/// Reads and updates count as activity. Sessions idle past the TTL are
/// dropped by the sweeper, covering views that never sent a `DELETE`.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, TryOnSession>>>,
}

impl SessionStore {
    pub async fn insert(&self, session: TryOnSession) -> Uuid {
        let id = session.id();
        self.inner.write().await.insert(id, session);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<TryOnSession> {
        self.inner.write().await.get_mut(&id).map(|session| {
            session.touch();
            session.clone()
        })
    }

    pub async fn phase(&self, id: Uuid) -> Option<Phase> {
        self.inner.read().await.get(&id).map(TryOnSession::phase)
    }

    /// Applies `f` to the session under the write lock.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut TryOnSession) -> R) -> Option<R> {
        self.inner.write().await.get_mut(&id).map(|session| {
            session.touch();
            f(session)
        })
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Drops every session untouched for longer than `ttl`. Returns how many went.
    pub async fn evict_idle(&self, ttl: Duration, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.idle_longer_than(ttl, now));
        before - sessions.len()
    }

    /// Runs `evict_idle` on a fixed period until the runtime shuts down.
    pub fn spawn_sweeper(&self, ttl: Duration, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(ttl, Utc::now()).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle try-on sessions");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styling::assembler::assemble;
    use crate::styling::models::StylingResult;

    fn asset(byte: u8) -> ImageAsset {
        ImageAsset::new("image/png", vec![byte])
    }

    fn ready_session() -> TryOnSession {
        let mut session = TryOnSession::new(Measurements::default(), SkinTone::Dusky);
        session.set_face(asset(1));
        session.set_garment(asset(2));
        session
    }

    fn fallback_result() -> TryOnResult {
        assemble(StylingResult::unavailable(), None, &asset(1), &asset(2))
    }

    #[test]
    fn test_new_session_starts_in_input() {
        let session = TryOnSession::new(Measurements::default(), SkinTone::Fair);
        assert_eq!(session.phase(), Phase::Input);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_generation_refused_without_face() {
        let mut session = TryOnSession::new(Measurements::default(), SkinTone::Fair);
        session.set_garment(asset(2));

        let err = session.begin_generation().unwrap_err();
        assert!(matches!(
            err,
            SessionError::MissingAssets {
                face: false,
                garment: true
            }
        ));
        assert_eq!(session.phase(), Phase::Input);
    }

    #[test]
    fn test_generation_refused_without_garment() {
        let mut session = TryOnSession::new(Measurements::default(), SkinTone::Fair);
        session.set_face(asset(1));
        assert!(session.begin_generation().is_err());
    }

    #[test]
    fn test_full_transition_input_avatar_result() {
        let mut session = ready_session();
        session.occasion = Occasion::Festival;

        let ticket = session.begin_generation().unwrap();
        assert_eq!(session.phase(), Phase::Avatar);
        assert_eq!(ticket.inputs.occasion, Occasion::Festival);
        assert_eq!(ticket.inputs.skin_tone, SkinTone::Dusky);

        assert!(session.complete_generation(ticket.generation_id, fallback_result()));
        assert_eq!(session.phase(), Phase::Result);
        assert!(session.result().is_some());
    }

    #[test]
    fn test_regenerate_from_result_resets_to_avatar() {
        let mut session = ready_session();
        let first = session.begin_generation().unwrap();
        session.complete_generation(first.generation_id, fallback_result());

        let second = session.begin_generation().unwrap();
        assert_eq!(session.phase(), Phase::Avatar);
        assert!(session.result().is_none());
        assert!(second.generation_id > first.generation_id);
    }

    #[test]
    fn test_new_garment_while_generating_discards_completion() {
        let mut session = ready_session();
        let ticket = session.begin_generation().unwrap();

        session.set_garment(asset(3));
        assert_eq!(session.phase(), Phase::Input);

        assert!(!session.complete_generation(ticket.generation_id, fallback_result()));
        assert_eq!(session.phase(), Phase::Input);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_view_reports_generating_flag() {
        let mut session = ready_session();
        session.begin_generation().unwrap();
        let view = session.view();
        assert!(view.is_generating);
        assert_eq!(
            serde_json::to_value(&view).unwrap()["phase"],
            serde_json::json!("avatar")
        );
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let store = SessionStore::default();
        let idle = store.insert(ready_session()).await;
        let ttl = Duration::from_secs(60);

        let later = Utc::now() + chrono::Duration::seconds(30);
        assert_eq!(store.evict_idle(ttl, later).await, 0);

        let fresh = store.insert(ready_session()).await;
        store
            .update(fresh, |s| s.last_touched = later)
            .await
            .unwrap();

        let much_later = Utc::now() + chrono::Duration::seconds(61);
        assert_eq!(store.evict_idle(ttl, much_later).await, 1);
        assert!(store.get(idle).await.is_none());
        assert!(store.get(fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_reads_keep_session_alive() {
        let store = SessionStore::default();
        let mut session = ready_session();
        session.last_touched = Utc::now() - chrono::Duration::seconds(120);
        let id = store.insert(session).await;

        let touched = store.get(id).await.unwrap().last_touched;
        assert!(Utc::now().signed_duration_since(touched) < chrono::Duration::seconds(5));
        assert_eq!(store.evict_idle(Duration::from_secs(60), Utc::now()).await, 0);
    }

    #[tokio::test]
    async fn test_sweeper_removes_abandoned_sessions() {
        let store = SessionStore::default();
        let mut session = ready_session();
        session.last_touched = Utc::now() - chrono::Duration::seconds(120);
        let id = store.insert(session).await;

        let sweeper = store.spawn_sweeper(Duration::from_secs(60), Duration::from_millis(5));
        for _ in 0..100 {
            if store.phase(id).await.is_none() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        sweeper.abort();
        assert!(store.phase(id).await.is_none());
    }

    #[tokio::test]
    async fn test_store_update_and_remove() {
        let store = SessionStore::default();
        let id = store.insert(ready_session()).await;

        let changed = store.update(id, |s| s.skin_tone = SkinTone::Dark).await;
        assert!(changed.is_some());
        assert_eq!(store.get(id).await.unwrap().skin_tone, SkinTone::Dark);

        assert!(store.remove(id).await);
        assert!(store.get(id).await.is_none());
        assert!(store.update(id, |_| ()).await.is_none());
    }
}
