//! Built-in verification checks.
//!
//! Each check reproduces one of the ad-hoc smoke scripts that grew up around
//! the tracking app, including their hardcoded UI strings and target ports.
//! The strings differ between checks because the scripts were written against
//! different iterations of the frontend; they are kept as observed.

use verificar::{Selector, Step, VerifyScript};

/// Default target for most checks
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// The UI overhaul check was written against the dev server on 3001
pub const DEFAULT_UI_URL: &str = "http://localhost:3001";

/// A named built-in check
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCheck {
    /// Check name, as accepted on the command line
    pub name: &'static str,
    /// One-line summary for `verificador list`
    pub summary: &'static str,
    /// Target URL when no override is given
    pub default_url: &'static str,
    build: fn(&str) -> VerifyScript,
}

impl BuiltinCheck {
    /// Build the check's script against an optional URL override
    #[must_use]
    pub fn build(&self, url_override: Option<&str>) -> VerifyScript {
        (self.build)(url_override.unwrap_or(self.default_url))
    }
}

/// All built-in checks, in run order
#[must_use]
pub fn builtin_checks() -> &'static [BuiltinCheck] {
    &[
        BuiltinCheck {
            name: "homepage",
            summary: "homepage renders Create Tracking and Connect Wallet",
            default_url: DEFAULT_APP_URL,
            build: homepage,
        },
        BuiltinCheck {
            name: "app-load",
            summary: "application loads and renders a body",
            default_url: DEFAULT_APP_URL,
            build: app_load,
        },
        BuiltinCheck {
            name: "ui",
            summary: "shipment modals open from the services cards",
            default_url: DEFAULT_UI_URL,
            build: ui,
        },
        BuiltinCheck {
            name: "wallet-modal",
            summary: "Connect Wallet prompts when MetaMask is absent",
            default_url: DEFAULT_APP_URL,
            build: wallet_modal,
        },
        BuiltinCheck {
            name: "frontend",
            summary: "tracking, profile, and shipment modals open and close",
            default_url: DEFAULT_APP_URL,
            build: frontend,
        },
    ]
}

/// Find a built-in check by name
#[must_use]
pub fn find(name: &str) -> Option<&'static BuiltinCheck> {
    builtin_checks().iter().find(|c| c.name == name)
}

fn homepage(url: &str) -> VerifyScript {
    VerifyScript::new("homepage")
        .describe("homepage renders the tracking heading and wallet button")
        .goto(url)
        .wait_for_text("Create Tracking")
        .expect_text("Create Tracking")
        .expect_text("Connect Wallet")
        .screenshot("homepage.png")
}

fn app_load(url: &str) -> VerifyScript {
    VerifyScript::new("app-load")
        .describe("application serves a page with rendered content")
        .goto(url)
        .expect_visible(Selector::css("body"))
        .screenshot("app_load.png")
}

fn ui(url: &str) -> VerifyScript {
    VerifyScript::new("ui")
        .describe("service cards open the shipment modals")
        .goto(url)
        .wait_for_text("SupplyChain")
        .screenshot_full("main_page.png")
        .click_text("Start a Shipment")
        .pause_ms(1000)
        .screenshot("start_modal.png")
        .click(Selector::css("button").with_text("Cancel"))
        .pause_ms(500)
        .click_text("Get Shipment Details")
        .pause_ms(1000)
        .screenshot("get_modal.png")
}

fn wallet_modal(url: &str) -> VerifyScript {
    VerifyScript::new("wallet-modal")
        .describe("wallet prompt appears when no extension is installed")
        .goto(url)
        .pause_ms(2000)
        .click_button("Connect Wallet")
        .pause_ms(1000)
        .expect_text("MetaMask Not Found")
        .screenshot("wallet_modal_check_final.png")
}

fn frontend(url: &str) -> VerifyScript {
    let modal = || Step::WaitVisible {
        selector: Selector::css(".ant-modal-content"),
        timeout_ms: Some(10_000),
    };

    VerifyScript::new("frontend")
        .describe("each dashboard modal opens and closes via Escape")
        .goto(url)
        .wait_for_text("Shipment Tracking")
        .pause_ms(1000)
        .screenshot_full("home_page_antd.png")
        .click_button("Add Tracking")
        .step(modal())
        .pause_ms(500)
        .screenshot("create_shipment_modal.png")
        .press("Escape")
        .pause_ms(500)
        .click_text("User Profile")
        .step(modal())
        .pause_ms(500)
        .screenshot("profile_modal.png")
        .press("Escape")
        .pause_ms(500)
        .click_text("Start Shipment")
        .step(modal())
        .pause_ms(500)
        .screenshot("start_shipment_modal.png")
        .press("Escape")
        .pause_ms(500)
}
