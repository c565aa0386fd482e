mod support;

use support::scripted::{self, ScriptedFetcher, THREE_COUNTRIES};

use carbonflo::egui_app::controller::EguiController;
use carbonflo::egui_app::state::Screen;
use carbonflo::insight::{INSIGHT_ERROR, INSIGHT_LOADING};
use carbonflo::session::{COUNTRY_LOAD_ALERT, MISSING_INPUT_TITLE, MetricsLoad};
use std::sync::Arc;
use std::time::Duration;

const METRICS: &str = "climate_prediction_algo";

fn controller(fetcher: &Arc<ScriptedFetcher>) -> EguiController {
    EguiController::new(scripted::api(fetcher), 40)
}

fn wait_until(controller: &mut EguiController, mut done: impl FnMut(&EguiController) -> bool) {
    for _ in 0..400 {
        controller.poll_background_jobs();
        if done(controller) {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("condition not reached");
}

fn settle(controller: &mut EguiController) {
    wait_until(controller, |c| !c.has_pending_jobs());
}

#[test]
fn trends_screen_loads_on_mount() {
    let fetcher = ScriptedFetcher::new();
    fetcher.reply(METRICS, THREE_COUNTRIES);
    let mut controller = controller(&fetcher);
    controller.mount_active_screen();
    assert!(controller.trends().metrics().is_loading());

    settle(&mut controller);
    assert_eq!(controller.trends().chart_values(), [88.0, 41.5, 97.0]);
    assert_eq!(controller.ui.status.text, "3 countries loaded");

    controller.mount_active_screen();
    settle(&mut controller);
    assert_eq!(fetcher.requests().len(), 1);
}

#[test]
fn point_click_shows_placeholder_then_insight() {
    let fetcher = ScriptedFetcher::new();
    fetcher.reply(METRICS, THREE_COUNTRIES);
    let release = fetcher.reply_gated("Brazil+has", r#"{"insight":"Deforestation slows progress."}"#);
    let mut controller = controller(&fetcher);
    controller.mount_active_screen();
    settle(&mut controller);

    controller.click_chart_point(1, 40.0, 60.0);
    let tooltip = controller.tooltip().unwrap();
    assert_eq!(tooltip.country, "Brazil");
    assert_eq!(tooltip.insight, INSIGHT_LOADING);

    release.send(()).unwrap();
    settle(&mut controller);
    let tooltip = controller.tooltip().unwrap();
    assert_eq!(tooltip.insight, "Deforestation slows progress.");
    assert_eq!((tooltip.x, tooltip.y), (40.0, 60.0));

    let sent = fetcher.insight_requests();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].json_content_type);
}

#[test]
fn later_click_wins_even_when_earlier_response_lands_last() {
    let fetcher = ScriptedFetcher::new();
    fetcher.reply(METRICS, THREE_COUNTRIES);
    let release_first = fetcher.reply_gated("Norway+has", "about Norway");
    fetcher.reply("Gambia+has", "about Gambia");
    let mut controller = controller(&fetcher);
    controller.mount_active_screen();
    settle(&mut controller);

    controller.click_chart_point(0, 0.0, 0.0);
    controller.click_chart_point(2, 10.0, 10.0);
    wait_until(&mut controller, |c| {
        c.tooltip().is_some_and(|tooltip| !tooltip.pending)
    });
    assert_eq!(controller.tooltip().unwrap().insight, "about Gambia");

    release_first.send(()).unwrap();
    settle(&mut controller);
    let tooltip = controller.tooltip().unwrap();
    assert_eq!(tooltip.country, "Gambia");
    assert_eq!(tooltip.insight, "about Gambia");
}

#[test]
fn insight_transport_failure_shows_error_text() {
    let fetcher = ScriptedFetcher::new();
    fetcher.reply(METRICS, THREE_COUNTRIES);
    fetcher.fail("Norway+has", "connection reset");
    let mut controller = controller(&fetcher);
    controller.mount_active_screen();
    settle(&mut controller);

    controller.click_chart_point(0, 0.0, 0.0);
    settle(&mut controller);
    assert_eq!(controller.tooltip().unwrap().insight, INSIGHT_ERROR);
}

#[test]
fn contribution_without_input_alerts_and_sends_nothing() {
    let fetcher = ScriptedFetcher::new();
    fetcher.reply(METRICS, THREE_COUNTRIES);
    let mut controller = controller(&fetcher);
    controller.show_screen(Screen::Contribution);
    settle(&mut controller);

    controller.contribution_mut().set_actions("rode my bike");
    controller.submit_contribution();
    let alert = controller.ui.alert.clone().unwrap();
    assert_eq!(alert.title, MISSING_INPUT_TITLE);
    assert_eq!(alert.message, "Please select a country and describe your actions.");
    assert!(!controller.has_pending_jobs());
    assert!(fetcher.insight_requests().is_empty());

    controller.dismiss_alert();
    assert!(controller.ui.alert.is_none());
}

#[test]
fn contribution_submission_shows_interpreted_response() {
    let fetcher = ScriptedFetcher::new();
    fetcher.reply(METRICS, THREE_COUNTRIES);
    fetcher.reply("user+is+from+Norway", r#""{\"message\": \"Nice work!\"}""#);
    let mut controller = controller(&fetcher);
    controller.show_screen(Screen::Contribution);
    settle(&mut controller);
    assert_eq!(controller.contribution().countries(), ["Norway", "Brazil", "Gambia"]);

    controller
        .contribution_mut()
        .select_country(Some("Norway".to_string()));
    controller.contribution_mut().set_actions("installed a heat pump");
    controller.submit_contribution();
    assert!(controller.contribution().is_loading());

    settle(&mut controller);
    assert!(!controller.contribution().is_loading());
    assert_eq!(controller.contribution().response(), Some("Nice work!"));
    let sent = fetcher.insight_requests();
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].json_content_type);
}

#[test]
fn contribution_country_failure_raises_alert() {
    let fetcher = ScriptedFetcher::new();
    fetcher.fail(METRICS, "connection refused");
    let mut controller = controller(&fetcher);
    controller.show_screen(Screen::Contribution);
    settle(&mut controller);

    let alert = controller.ui.alert.clone().unwrap();
    assert_eq!(alert.title, "Error");
    assert_eq!(alert.message, COUNTRY_LOAD_ALERT);
    assert!(controller.contribution().countries().is_empty());
}

#[test]
fn trends_failure_leaves_chart_empty_without_alert() {
    let fetcher = ScriptedFetcher::new();
    fetcher.reply(METRICS, "<html>502 Bad Gateway</html>");
    let mut controller = controller(&fetcher);
    controller.mount_active_screen();
    settle(&mut controller);

    assert!(matches!(controller.trends().metrics(), MetricsLoad::Failed(_)));
    assert!(controller.trends().chart_values().is_empty());
    assert!(controller.ui.alert.is_none());
}

#[test]
fn each_screen_loads_its_own_countries() {
    let fetcher = ScriptedFetcher::new();
    fetcher.reply(METRICS, THREE_COUNTRIES);
    fetcher.reply(METRICS, THREE_COUNTRIES);
    let mut controller = controller(&fetcher);
    controller.mount_active_screen();
    controller.show_screen(Screen::Contribution);
    settle(&mut controller);

    assert!(controller.trends().metrics().metrics().is_some());
    assert!(controller.contribution().metrics().metrics().is_some());
    assert_eq!(fetcher.requests().len(), 2);
}
