//! # unsubmit-plugin
//!
//! Survey-host integration for the submission-reset policy in
//! `unsubmit-core`.
//!
//! The plugin subscribes to three host hooks:
//!
//! - **page render**: evaluates the reset policy against the incoming
//!   request, the survey session, and the survey configuration; when every
//!   guard holds, the session's response is set back to unsubmitted
//! - **settings panel**: contributes one select field (yes / no / use global
//!   default) to the host's per-survey settings page
//! - **settings saved**: copies the submitted settings into the host's
//!   key-value store at survey scope
//!
//! The host supplies its session, settings, survey-metadata, response, and
//! localization services through the traits in [`host`]; the plugin owns no
//! state beyond its manifest.
//!
//! ## Example
//!
//! ```rust,ignore
//! use unsubmit_plugin::{HostContext, PageRenderEvent, UnsubmitPlugin};
//!
//! let plugin = UnsubmitPlugin::default();
//! for hook in plugin.hooks() {
//!     dispatcher.subscribe(hook.name());
//! }
//!
//! // Per request, from the dispatcher:
//! let outcome = plugin.on_page_render(&mut host_context, Some(&event))?;
//! ```

pub mod events;
pub mod host;
pub mod manifest;
pub mod plugin;
pub mod settings_panel;
pub mod testing;

// Re-export main types at crate root
pub use events::{Hook, PageRenderEvent, RequestMethod, SettingsPanelEvent, SettingsSavedEvent};
pub use host::{
    IdentityTranslator, SessionStore, SettingScope, SettingsStore, SurveyRepository,
    SurveySession, Translator,
};
pub use manifest::{ManifestError, PluginManifest};
pub use plugin::{HookError, HostContext, UnsubmitPlugin, ACTIVE_SETTING};
pub use settings_panel::{FieldInput, SelectOption, SettingsField, SettingsPanel};
