//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose journey screen events and session state to Dart via FRB.
//! - Fold every core error into a response envelope.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - One journey session exists per process; `journey_reset` remounts it.
//! - One app context exists per process. It is loaded from the session DB on
//!   first use; only account, baby and onboarding flag are written back.

use chrono::NaiveDate;
use log::warn;
use sprout_core::db::open_db;
use sprout_core::{
    activity_completion, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, AppContext, BabyProfile, BabySex, Clock, JourneyConfig, JourneyService,
    SavedItem, SavedKind, SessionStore, SqliteKeyValueRepository, SystemClock, UserAccount,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const SESSION_DB_FILE_NAME: &str = "sprout_session.sqlite3";
static SESSION_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static JOURNEY: OnceLock<Mutex<Option<JourneyService>>> = OnceLock::new();
static SESSION: OnceLock<Mutex<Option<AppContext>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Domain card as rendered on the journey screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCardView {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub progress: u8,
}

/// Milestone row for the selected domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneRowView {
    pub id: String,
    pub title: String,
    pub age_range: String,
    pub observed: bool,
    /// `YYYY-MM-DD` when observed.
    pub date_observed: Option<String>,
    pub activity_completion: u8,
}

/// Flattened journey screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyStateView {
    pub phase_ids: Vec<String>,
    pub phase_id: String,
    pub phase_name: String,
    pub domains: Vec<DomainCardView>,
    pub selected_domain_id: Option<String>,
    /// `overview|milestones|activities`.
    pub view_mode: String,
    pub milestones: Vec<MilestoneRowView>,
    pub detailed_milestone_id: Option<String>,
}

/// Envelope for every journey call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyResponse {
    pub ok: bool,
    pub message: String,
    pub state: Option<JourneyStateView>,
}

/// Envelope for session/onboarding calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub ok: bool,
    pub message: String,
    pub signed_in: bool,
    pub onboarding_completed: bool,
    pub baby_name: Option<String>,
    pub baby_age_weeks: Option<u32>,
}

/// Saved content row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedItemView {
    pub content_id: String,
    /// `insight|question|activity|milestone`.
    pub kind: String,
    pub title: String,
    /// `YYYY-MM-DD`.
    pub saved_on: String,
}

/// Envelope for saved-content calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedResponse {
    pub ok: bool,
    pub message: String,
    /// Saved state of the addressed content id; `None` for list calls.
    pub saved: Option<bool>,
    /// Saved items, newest first, after the call.
    pub items: Vec<SavedItemView>,
}

/// Remounts the journey screen on seed data.
///
/// `config_json` optionally overrides swipe threshold and unresolved-id
/// policy.
#[flutter_rust_bridge::frb(sync)]
pub fn journey_reset(config_json: Option<String>) -> JourneyResponse {
    let config = match config_json.as_deref().map(JourneyConfig::from_json_str) {
        None => JourneyConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(err)) => return JourneyResponse::failure(format!("journey_reset failed: {err}")),
    };
    let mut slot = lock_journey();
    match JourneyService::from_seed(config) {
        Ok(service) => {
            let state = render_state(&service);
            *slot = Some(service);
            JourneyResponse::success("Journey ready.", state)
        }
        Err(err) => JourneyResponse::failure(format!("journey_reset failed: {err}")),
    }
}

/// Current journey state, mounting with defaults on first use.
#[flutter_rust_bridge::frb(sync)]
pub fn journey_state() -> JourneyResponse {
    with_journey("journey_state", |_| Ok("OK.".to_string()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn journey_select_phase(phase_id: String) -> JourneyResponse {
    with_journey("journey_select_phase", |service| {
        let applied = service.select_phase(phase_id.trim())?;
        Ok(applied_message(applied, "Phase selected."))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn journey_tap_domain(domain_id: String) -> JourneyResponse {
    with_journey("journey_tap_domain", |service| {
        let mode = service.tap_domain(domain_id.trim())?;
        Ok(applied_message(mode.is_some(), "Domain updated."))
    })
}

/// Applies a released horizontal swipe of `dx` logical pixels.
#[flutter_rust_bridge::frb(sync)]
pub fn journey_swipe_release(domain_id: String, dx: f32) -> JourneyResponse {
    with_journey("journey_swipe_release", |service| {
        let mode = service.release_swipe(domain_id.trim(), dx)?;
        Ok(applied_message(mode.is_some(), "Domain updated."))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn journey_toggle_milestone(milestone_id: String) -> JourneyResponse {
    with_journey("journey_toggle_milestone", |service| {
        let toggled = service.toggle_milestone(milestone_id.trim())?;
        Ok(match toggled {
            Some(t) if t.observed => "Milestone observed.".to_string(),
            Some(_) => "Milestone cleared.".to_string(),
            None => "No change.".to_string(),
        })
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn journey_toggle_activity(milestone_id: String, activity_id: String) -> JourneyResponse {
    with_journey("journey_toggle_activity", |service| {
        let toggled = service.toggle_activity(milestone_id.trim(), activity_id.trim())?;
        Ok(applied_message(toggled.is_some(), "Activity updated."))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn journey_select_milestone(milestone_id: String) -> JourneyResponse {
    with_journey("journey_select_milestone", |service| {
        let applied = service.select_milestone(milestone_id.trim())?;
        Ok(applied_message(applied, "Milestone opened."))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn journey_back() -> JourneyResponse {
    with_journey("journey_back", |service| {
        Ok(applied_message(service.back(), "Back to milestones."))
    })
}

/// Current auth/onboarding state. Never writes to the session DB.
#[flutter_rust_bridge::frb(sync)]
pub fn onboarding_status() -> SessionResponse {
    with_session("onboarding_status", |_| Ok("OK.".to_string()))
}

/// Mock sign-in: records the account locally.
#[flutter_rust_bridge::frb(sync)]
pub fn sign_in(email: String, display_name: String) -> SessionResponse {
    with_session("sign_in", |ctx| {
        persist_edit(ctx, |draft| {
            let user = UserAccount::new(email, display_name).map_err(|err| err.to_string())?;
            draft.sign_in(user);
            Ok("Signed in.".to_string())
        })
    })
}

/// Final onboarding step. `birth_date` is `YYYY-MM-DD`; `sex` is
/// `female|male` when given.
#[flutter_rust_bridge::frb(sync)]
pub fn onboarding_complete(
    baby_name: String,
    birth_date: String,
    sex: Option<String>,
) -> SessionResponse {
    with_session("onboarding_complete", |ctx| {
        persist_edit(ctx, |draft| {
            draft.complete_onboarding(parse_baby(baby_name, &birth_date, sex.as_deref())?);
            Ok("Onboarding completed.".to_string())
        })
    })
}

/// Profile edit screen: replaces the baby profile.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_update_baby(
    baby_name: String,
    birth_date: String,
    sex: Option<String>,
) -> SessionResponse {
    with_session("profile_update_baby", |ctx| {
        persist_edit(ctx, |draft| {
            draft.set_baby(parse_baby(baby_name, &birth_date, sex.as_deref())?);
            Ok("Profile updated.".to_string())
        })
    })
}

/// Sends the user back through onboarding; the account is kept.
#[flutter_rust_bridge::frb(sync)]
pub fn onboarding_reset() -> SessionResponse {
    with_session("onboarding_reset", |ctx| {
        persist_edit(ctx, |draft| {
            draft.reset_onboarding();
            Ok("Onboarding reset.".to_string())
        })
    })
}

/// Clears every persisted session record and the in-memory context.
#[flutter_rust_bridge::frb(sync)]
pub fn sign_out() -> SessionResponse {
    let mut slot = lock_session();
    match with_session_store(|store| store.clear().map_err(|err| err.to_string())) {
        Ok(()) => {
            let ctx = slot.get_or_insert_with(AppContext::default);
            ctx.sign_out();
            SessionResponse::from_context(true, "Signed out.", ctx)
        }
        Err(err) => SessionResponse::failure(format!("sign_out failed: {err}")),
    }
}

/// Saves content, or unsaves it when `content_id` is already saved.
#[flutter_rust_bridge::frb(sync)]
pub fn saved_toggle(content_id: String, kind: String, title: String) -> SavedResponse {
    with_saved("saved_toggle", None, |ctx| {
        let content_id = content_id.trim();
        if content_id.is_empty() {
            return Err("content_id must not be blank".to_string());
        }
        let kind = kind.parse::<SavedKind>().map_err(|err| err.to_string())?;
        let now_saved = ctx.toggle_saved(SavedItem {
            content_id: content_id.to_string(),
            kind,
            title: title.trim().to_string(),
            saved_on: SystemClock.today(),
        });
        let message = if now_saved { "Saved." } else { "Unsaved." };
        Ok((message.to_string(), Some(now_saved)))
    })
}

/// Unsaves one content id.
#[flutter_rust_bridge::frb(sync)]
pub fn saved_remove(content_id: String) -> SavedResponse {
    with_saved("saved_remove", None, |ctx| {
        let removed = ctx.remove_saved(content_id.trim());
        Ok((applied_message(removed, "Unsaved."), Some(false)))
    })
}

/// Whether one content id is saved.
#[flutter_rust_bridge::frb(sync)]
pub fn saved_contains(content_id: String) -> SavedResponse {
    with_saved("saved_contains", None, |ctx| {
        Ok(("OK.".to_string(), Some(ctx.is_saved(content_id.trim()))))
    })
}

/// Saved items, newest first, optionally filtered by kind.
#[flutter_rust_bridge::frb(sync)]
pub fn saved_list(kind: Option<String>) -> SavedResponse {
    let filter = match kind.as_deref().map(str::parse::<SavedKind>).transpose() {
        Ok(filter) => filter,
        Err(err) => return SavedResponse::failure(format!("saved_list failed: {err}")),
    };
    with_saved("saved_list", filter, |_| Ok(("OK.".to_string(), None)))
}

impl JourneyResponse {
    fn success(message: impl Into<String>, state: JourneyStateView) -> Self {
        Self {
            ok: true,
            message: message.into(),
            state: Some(state),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            state: None,
        }
    }
}

impl SessionResponse {
    fn from_context(ok: bool, message: impl Into<String>, ctx: &AppContext) -> Self {
        let today = SystemClock.today();
        Self {
            ok,
            message: message.into(),
            signed_in: ctx.is_signed_in(),
            onboarding_completed: ctx.is_onboarding_completed(),
            baby_name: ctx.baby().map(|baby| baby.name.clone()),
            baby_age_weeks: ctx.baby_age_in_weeks(today),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self::from_context(false, message, &AppContext::default())
    }
}

impl SavedResponse {
    fn from_context(
        ok: bool,
        message: impl Into<String>,
        saved: Option<bool>,
        ctx: &AppContext,
        filter: Option<SavedKind>,
    ) -> Self {
        Self {
            ok,
            message: message.into(),
            saved,
            items: ctx
                .saved_items(filter)
                .into_iter()
                .map(|item| SavedItemView {
                    content_id: item.content_id.clone(),
                    kind: item.kind.as_str().to_string(),
                    title: item.title.clone(),
                    saved_on: item.saved_on.format("%Y-%m-%d").to_string(),
                })
                .collect(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            saved: None,
            items: Vec::new(),
        }
    }
}

fn applied_message(applied: bool, message: &str) -> String {
    if applied {
        message.to_string()
    } else {
        "No change.".to_string()
    }
}

fn lock_journey() -> MutexGuard<'static, Option<JourneyService>> {
    let mutex = JOURNEY.get_or_init(|| Mutex::new(None));
    // A panic while holding the lock leaves a usable tree; recover the guard.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_journey(
    operation: &'static str,
    f: impl FnOnce(&mut JourneyService) -> Result<String, sprout_core::JourneyError>,
) -> JourneyResponse {
    let mut slot = lock_journey();
    if slot.is_none() {
        match JourneyService::from_seed(JourneyConfig::default()) {
            Ok(service) => *slot = Some(service),
            Err(err) => return JourneyResponse::failure(format!("{operation} failed: {err}")),
        }
    }
    let Some(service) = slot.as_mut() else {
        return JourneyResponse::failure(format!("{operation} failed: journey unavailable"));
    };

    match f(service) {
        Ok(message) => JourneyResponse::success(message, render_state(service)),
        Err(err) => {
            warn!("event={operation} module=ffi status=error error={err}");
            JourneyResponse {
                ok: false,
                message: format!("{operation} failed: {err}"),
                state: Some(render_state(service)),
            }
        }
    }
}

fn lock_session() -> MutexGuard<'static, Option<AppContext>> {
    let mutex = SESSION.get_or_init(|| Mutex::new(None));
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_session_store<T>(
    f: impl FnOnce(&SessionStore<SqliteKeyValueRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_session_db_path())
        .map_err(|err| format!("session DB open failed: {err}"))?;
    let repo = SqliteKeyValueRepository::try_new(&conn)
        .map_err(|err| format!("session repo init failed: {err}"))?;
    f(&SessionStore::new(repo))
}

/// Returns the process context, loading it from the session DB once.
fn loaded_context(slot: &mut Option<AppContext>) -> Result<&mut AppContext, String> {
    if slot.is_none() {
        let ctx = with_session_store(|store| store.load().map_err(|err| err.to_string()))?;
        *slot = Some(ctx);
    }
    slot.as_mut().ok_or_else(|| "session unavailable".to_string())
}

/// Applies `edit` to a copy, persists it, then commits it in memory.
///
/// A failed edit or write leaves the context unchanged.
fn persist_edit(
    ctx: &mut AppContext,
    edit: impl FnOnce(&mut AppContext) -> Result<String, String>,
) -> Result<String, String> {
    let mut draft = ctx.clone();
    let message = edit(&mut draft)?;
    with_session_store(|store| store.persist(&draft).map_err(|err| err.to_string()))?;
    *ctx = draft;
    Ok(message)
}

fn with_session(
    operation: &'static str,
    f: impl FnOnce(&mut AppContext) -> Result<String, String>,
) -> SessionResponse {
    let mut slot = lock_session();
    let ctx = match loaded_context(&mut slot) {
        Ok(ctx) => ctx,
        Err(err) => return SessionResponse::failure(format!("{operation} failed: {err}")),
    };
    match f(ctx) {
        Ok(message) => SessionResponse::from_context(true, message, ctx),
        Err(err) => SessionResponse::from_context(false, format!("{operation} failed: {err}"), ctx),
    }
}

fn with_saved(
    operation: &'static str,
    filter: Option<SavedKind>,
    f: impl FnOnce(&mut AppContext) -> Result<(String, Option<bool>), String>,
) -> SavedResponse {
    let mut slot = lock_session();
    let ctx = match loaded_context(&mut slot) {
        Ok(ctx) => ctx,
        Err(err) => return SavedResponse::failure(format!("{operation} failed: {err}")),
    };
    match f(ctx) {
        Ok((message, saved)) => SavedResponse::from_context(true, message, saved, ctx, filter),
        Err(err) => SavedResponse::from_context(
            false,
            format!("{operation} failed: {err}"),
            None,
            ctx,
            filter,
        ),
    }
}

fn parse_baby(name: String, birth_date: &str, sex: Option<&str>) -> Result<BabyProfile, String> {
    let birth_date = NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid birth_date: {err}"))?;
    let sex = sex
        .map(str::parse::<BabySex>)
        .transpose()
        .map_err(|err| err.to_string())?;
    BabyProfile::new(name, birth_date, sex).map_err(|err| err.to_string())
}

fn resolve_session_db_path() -> PathBuf {
    SESSION_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("SPROUT_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(SESSION_DB_FILE_NAME)
        })
        .clone()
}

fn render_state(service: &JourneyService) -> JourneyStateView {
    let selection = service.selection();
    let (phase_name, domains) = match service.selected_phase() {
        Ok(phase) => (
            phase.name,
            phase
                .domains
                .into_iter()
                .map(|domain| DomainCardView {
                    id: domain.id,
                    name: domain.name,
                    icon: domain.icon,
                    color: domain.color,
                    progress: domain.progress,
                })
                .collect(),
        ),
        Err(_) => (String::new(), Vec::new()),
    };
    let milestones = service
        .selected_domain()
        .map(|domain| {
            domain
                .milestones
                .iter()
                .map(|milestone| MilestoneRowView {
                    id: milestone.id.clone(),
                    title: milestone.title.clone(),
                    age_range: milestone.age_range.clone(),
                    observed: milestone.observed,
                    date_observed: milestone
                        .date_observed
                        .map(|date| date.format("%Y-%m-%d").to_string()),
                    activity_completion: activity_completion(milestone),
                })
                .collect()
        })
        .unwrap_or_default();

    JourneyStateView {
        phase_ids: service
            .tree()
            .phase_ids()
            .into_iter()
            .map(str::to_string)
            .collect(),
        phase_id: selection.phase_id().to_string(),
        phase_name,
        domains,
        selected_domain_id: selection.domain_id().map(str::to_string),
        view_mode: selection.view_mode().label().to_string(),
        milestones,
        detailed_milestone_id: selection.milestone_id().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, journey_back, journey_reset, journey_select_milestone,
        journey_select_phase, journey_swipe_release, journey_tap_domain,
        journey_toggle_milestone, onboarding_complete, onboarding_reset, onboarding_status, ping,
        profile_update_baby, resolve_session_db_path, saved_contains, saved_list, saved_remove,
        saved_toggle, sign_in, sign_out,
    };
    use sprout_core::db::open_db;
    use sprout_core::{KeyValueRepository, SqliteKeyValueRepository};
    use std::sync::{Mutex, MutexGuard};

    // Journey and session calls share process-wide state.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn stored_keys() -> Vec<String> {
        let conn = open_db(resolve_session_db_path()).expect("session db");
        let repo = SqliteKeyValueRepository::try_new(&conn).expect("session repo");
        repo.keys().expect("keys")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn journey_flow_updates_flattened_state() {
        let _guard = serial();
        let reset = journey_reset(Some(r#"{"unresolved_ids": "reject"}"#.to_string()));
        assert!(reset.ok, "{}", reset.message);

        let tapped = journey_tap_domain("physical".to_string());
        let state = tapped.state.expect("state");
        assert_eq!(state.selected_domain_id.as_deref(), Some("physical"));
        assert_eq!(state.view_mode, "overview");

        let toggled = journey_toggle_milestone("lifts-head".to_string());
        assert!(toggled.ok, "{}", toggled.message);
        let state = toggled.state.expect("state");
        let row = state
            .milestones
            .iter()
            .find(|row| row.id == "lifts-head")
            .expect("milestone row");
        assert!(row.observed);
        assert!(row.date_observed.is_some());
        let card = state.domains.iter().find(|d| d.id == "physical").unwrap();
        assert_eq!(card.progress, 33);

        let swiped = journey_swipe_release("physical".to_string(), -120.0);
        assert_eq!(swiped.state.unwrap().view_mode, "milestones");

        assert!(journey_select_milestone("opens-hands".to_string()).ok);
        let back = journey_back();
        let state = back.state.unwrap();
        assert_eq!(state.detailed_milestone_id, None);
        assert_eq!(state.view_mode, "milestones");

        let switched = journey_select_phase("2-4-months".to_string());
        let state = switched.state.unwrap();
        assert_eq!(state.phase_name, "2-4 Months");
        assert_eq!(state.selected_domain_id, None);
    }

    #[test]
    fn journey_errors_keep_state_and_report_message() {
        let _guard = serial();
        assert!(journey_reset(Some(r#"{"unresolved_ids": "reject"}"#.to_string())).ok);

        let response = journey_toggle_milestone("lifts-head".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("no domain is selected"));
        assert!(response.state.is_some());

        let bad_config = journey_reset(Some(r#"{"swipe_threshold_px": -1}"#.to_string()));
        assert!(!bad_config.ok);
    }

    #[test]
    fn saved_items_outlive_the_call_that_saved_them() {
        let _guard = serial();
        assert!(sign_out().ok);

        let saved = saved_toggle(
            "insight-week-6".to_string(),
            "insight".to_string(),
            "Tummy time".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(saved.saved, Some(true));
        let asked = saved_toggle(
            "q-sleep".to_string(),
            "Question".to_string(),
            "Night waking".to_string(),
        );
        assert!(asked.ok, "{}", asked.message);

        let listed = saved_list(None);
        let ids: Vec<&str> = listed.items.iter().map(|i| i.content_id.as_str()).collect();
        assert_eq!(ids, vec!["q-sleep", "insight-week-6"]);

        let insights = saved_list(Some("insight".to_string()));
        assert_eq!(insights.items.len(), 1);
        assert_eq!(insights.items[0].kind, "insight");
        assert_eq!(insights.items[0].title, "Tummy time");
        assert_eq!(saved_contains("insight-week-6".to_string()).saved, Some(true));

        let removed = saved_remove("insight-week-6".to_string());
        assert_eq!(removed.saved, Some(false));
        assert_eq!(removed.items.len(), 1);
        assert_eq!(saved_contains("insight-week-6".to_string()).saved, Some(false));

        assert!(!saved_list(Some("recipe".to_string())).ok);
        assert!(!saved_toggle(" ".to_string(), "insight".to_string(), String::new()).ok);

        assert!(sign_out().ok);
        assert!(saved_list(None).items.is_empty());
    }

    #[test]
    fn onboarding_and_profile_edits_are_persisted() {
        let _guard = serial();
        assert!(sign_out().ok);

        let status = onboarding_status();
        assert!(status.ok, "{}", status.message);
        assert!(!status.signed_in);
        assert!(!status.onboarding_completed);

        let signed = sign_in("parent@example.com".to_string(), "Sam".to_string());
        assert!(signed.signed_in, "{}", signed.message);
        let done = onboarding_complete("Robin".to_string(), "2026-01-01".to_string(), None);
        assert!(done.onboarding_completed, "{}", done.message);
        assert_eq!(done.baby_name.as_deref(), Some("Robin"));

        let edited = profile_update_baby(
            "Robin Lee".to_string(),
            "2026-01-02".to_string(),
            Some("female".to_string()),
        );
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.baby_name.as_deref(), Some("Robin Lee"));

        let rejected = profile_update_baby(" ".to_string(), "2026-01-02".to_string(), None);
        assert!(!rejected.ok);
        assert_eq!(rejected.baby_name.as_deref(), Some("Robin Lee"));
        assert!(!profile_update_baby("Robin".to_string(), "01/02/2026".to_string(), None).ok);
        assert_eq!(stored_keys(), vec!["babyData", "onboardingCompleted", "user"]);

        let reset = onboarding_reset();
        assert!(reset.signed_in);
        assert!(!reset.onboarding_completed);
        assert_eq!(reset.baby_name, None);

        let out = sign_out();
        assert!(!out.signed_in);
        assert!(stored_keys().is_empty());
    }

    #[test]
    fn status_reads_do_not_write_session_records() {
        let _guard = serial();
        assert!(sign_out().ok);
        assert!(stored_keys().is_empty());

        assert!(onboarding_status().ok);
        assert!(saved_list(None).ok);
        assert!(stored_keys().is_empty());
    }
}
