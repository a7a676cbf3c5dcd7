//! Test support for the one-time-password input.
//!
//! A simulated browser ([`FakeDom`], [`FakeHost`], [`Browser`]), a manual
//! clock, key-chord parsing and a TOML scenario runner. Nothing here ships in
//! the component itself.

mod browser;
mod chord;
mod clock;
mod dom;
mod scenario;

pub use browser::{Browser, CallbackLog};
pub use chord::parse_chord;
pub use clock::ManualClock;
pub use dom::{FakeDom, FakeHost};
pub use scenario::{
    PressSpec, Scenario, ScenarioConfig, Step, fixtures_dir, load_scenarios, parse_scenarios,
    run_scenario,
};

/// A JSON snapshot of the slot state, for readable assertion failures.
pub fn render_snapshot(state: &otp_core::RenderState) -> String {
    serde_json::to_string(state).unwrap_or_else(|err| panic!("render state not serializable: {err}"))
}
