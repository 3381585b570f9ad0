use git_dash::boxlayout::LayoutBox;
use git_dash::ui::info_bar::{is_spacer_window, InfoBar, SpacerBoxes, MAX_SPACER_BOXES};
use git_dash::ui::windows;

fn shape(boxes: &[LayoutBox<'_>]) -> Vec<(String, Option<u16>, u32)> {
    boxes
        .iter()
        .map(|b| {
            (
                b.window_name().unwrap_or_default().to_string(),
                b.size,
                b.weight,
            )
        })
        .collect()
}

fn entry(name: &str, size: Option<u16>, weight: u32) -> (String, Option<u16>, u32) {
    (name.to_string(), size, weight)
}

#[test]
fn test_information_alone_is_right_aligned() {
    let bar = InfoBar {
        information: "done",
        any_mode_active: true,
        ..InfoBar::default()
    };

    assert_eq!(
        shape(&bar.boxes()),
        vec![
            entry("statusSpacer1", None, 1),
            entry("statusSpacer2", Some(1), 0),
            entry(windows::INFORMATION, Some(4), 0),
        ]
    );
}

#[test]
fn test_app_status_left_information_right() {
    let bar = InfoBar {
        information: "x",
        app_status: "ok",
        any_mode_active: true,
        ..InfoBar::default()
    };

    assert_eq!(
        shape(&bar.boxes()),
        vec![
            entry(windows::APP_STATUS, Some(2), 0),
            entry("statusSpacer2", Some(1), 0),
            entry("statusSpacer1", None, 1),
            entry("statusSpacer3", Some(1), 0),
            entry(windows::INFORMATION, Some(1), 0),
        ]
    );
}

#[test]
fn test_full_bottom_line() {
    let bar = InfoBar {
        information: "git-dash",
        app_status: "Loading",
        show_bottom_line: true,
        ..InfoBar::default()
    };

    let names: Vec<String> = shape(&bar.boxes()).into_iter().map(|e| e.0).collect();
    assert_eq!(
        names,
        vec![
            windows::APP_STATUS,
            "statusSpacer1",
            windows::OPTIONS,
            "statusSpacer2",
            windows::INFORMATION,
        ]
    );
}

#[test]
fn test_single_segment_fills_line() {
    let bar = InfoBar {
        app_status: "Loading",
        ..InfoBar::default()
    };

    assert_eq!(
        shape(&bar.boxes()),
        vec![entry(windows::APP_STATUS, None, 1)]
    );
}

#[test]
fn test_demo_hides_status_and_information() {
    let bar = InfoBar {
        information: "git-dash",
        app_status: "Loading",
        show_bottom_line: true,
        in_demo: true,
        ..InfoBar::default()
    };

    assert_eq!(shape(&bar.boxes()), vec![entry(windows::OPTIONS, None, 1)]);
}

#[test]
fn test_active_mode_shows_information_in_demo() {
    let bar = InfoBar {
        information: "Building patch",
        show_bottom_line: true,
        in_demo: true,
        any_mode_active: true,
        ..InfoBar::default()
    };

    let names: Vec<String> = shape(&bar.boxes()).into_iter().map(|e| e.0).collect();
    assert_eq!(
        names,
        vec![windows::OPTIONS, "statusSpacer1", windows::INFORMATION]
    );
}

#[test]
fn test_information_width_ignores_colours() {
    let bar = InfoBar {
        information: "\x1b[32mBuilding\x1b[0m",
        any_mode_active: true,
        ..InfoBar::default()
    };

    let boxes = bar.boxes();
    let info = boxes
        .iter()
        .find(|b| b.window_name() == Some(windows::INFORMATION))
        .unwrap();
    assert_eq!(info.size, Some(8));
}

#[test]
fn test_search_prompt_replaces_bar() {
    let bar = InfoBar {
        information: "git-dash",
        app_status: "Loading",
        search_prefix: Some("Search: "),
        show_bottom_line: true,
        ..InfoBar::default()
    };

    assert_eq!(
        shape(&bar.boxes()),
        vec![
            entry(windows::SEARCH_PREFIX, Some(8), 0),
            entry(windows::SEARCH, None, 1),
        ]
    );
}

#[test]
fn test_nothing_to_show() {
    let bar = InfoBar::default();
    assert!(bar.boxes().is_empty());
}

#[test]
fn test_spacer_windows_recognised() {
    assert!(is_spacer_window("statusSpacer1"));
    assert!(is_spacer_window("statusSpacer5"));
    assert!(!is_spacer_window("statusSpacer6"));
    assert!(!is_spacer_window(windows::OPTIONS));
}

#[test]
fn test_spacer_boxes_count_usage() {
    let mut spacers = SpacerBoxes::default();
    let fixed = spacers.fixed();
    let flexible = spacers.flexible();

    assert_eq!(fixed.size, Some(1));
    assert_eq!(flexible.weight, 1);
    assert_eq!(spacers.used(), 2);
}

#[test]
#[should_panic(expected = "spacer boxes")]
fn test_spacer_budget_exhausted() {
    let mut spacers = SpacerBoxes::default();
    for _ in 0..=MAX_SPACER_BOXES {
        let _ = spacers.fixed();
    }
}
