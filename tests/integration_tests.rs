//! Tests that drive a real browser through the Node.js browser server.
//!
//! They need Node.js and the server script at `node/browser_server.js`
//! (or `WEB_FIXTURE_SERVER`), so they are `#[ignore]`d. Run them with:
//!
//! ```bash
//! cargo test -- --ignored
//! ```

use web_fixture::actions::fixture::Fixture;
use web_fixture::browser::session::{BrowserSession, DEFAULT_BROWSER_SERVER};
use web_fixture::form::extract::FormValue;
use web_fixture::form::seed::Seed;

const SIGNUP_PAGE: &str = "data:text/html,<form id='signup'>\
<input id='name' type='text'>\
<input id='agree' type='checkbox'>\
<select id='color'><option value='red'>Red</option><option value='blue'>Blue</option></select>\
<input name='size' type='radio' value='S'><input name='size' type='radio' value='L'>\
</form>";

fn launch() -> BrowserSession {
    let script = std::env::var("WEB_FIXTURE_SERVER").unwrap_or_else(|_| DEFAULT_BROWSER_SERVER.to_string());
    BrowserSession::launch(&script).expect("browser server should start")
}

#[test]
#[ignore]
fn live_session_launch_and_quit() {
    let mut session = launch();
    session.quit().unwrap();
    // Second quit is a no-op
    session.quit().unwrap();
}

#[test]
#[ignore]
fn live_structured_fill_round_trips_through_extract() {
    let mut fixture = Fixture::new(launch());

    let seed = Seed::from_pairs([("name", "Ada"), ("agree", "true"), ("color", "blue"), ("size", "L")]);
    fixture.i().navigate().to(SIGNUP_PAGE).unwrap();
    fixture.i().auto_fill("#signup", seed).unwrap();

    let data = fixture.i().form("#signup").unwrap().form_data().unwrap();
    assert_eq!(data.get("name"), Some(&FormValue::Text("Ada".into())));
    assert_eq!(data.get("agree"), Some(&FormValue::Bool(true)));
    assert_eq!(data.len(), 2);
}

#[test]
#[ignore]
fn live_simple_seed_selects_one_radio() {
    let mut fixture = Fixture::new(launch());
    fixture.i().navigate().to(SIGNUP_PAGE).unwrap();

    fixture.i().auto_fill("#signup", Seed::simple(42)).unwrap();

    let mut i = fixture.i();
    assert_eq!(i.get().value("#name").unwrap(), "42");
    assert_eq!(i.count("input[name='size']:checked").unwrap(), 1);
}
