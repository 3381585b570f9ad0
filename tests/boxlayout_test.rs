use git_dash::boxlayout::{
    arrange_windows, calc_sizes, normalize_weights, Dimensions, Direction, LayoutBox,
};

#[test]
fn test_single_window_fills_area() {
    let root = LayoutBox::window("main");
    let dims = arrange_windows(&root, 2, 3, 40, 10);

    assert_eq!(dims.len(), 1);
    assert_eq!(dims["main"], Dimensions::new(2, 3, 40, 10));
}

#[test]
fn test_column_split_by_weight() {
    let root = LayoutBox::split(
        Direction::Column,
        vec![
            LayoutBox::window("left").weight(1),
            LayoutBox::window("right").weight(2),
        ],
    );
    let dims = arrange_windows(&root, 0, 0, 90, 20);

    assert_eq!(dims["left"], Dimensions::new(0, 0, 30, 20));
    assert_eq!(dims["right"], Dimensions::new(30, 0, 60, 20));
}

#[test]
fn test_row_split_stacks_vertically() {
    let root = LayoutBox::split(
        Direction::Row,
        vec![
            LayoutBox::window("top").weight(1),
            LayoutBox::window("bottom").weight(1),
        ],
    );
    let dims = arrange_windows(&root, 0, 0, 10, 8);

    assert_eq!(dims["top"], Dimensions::new(0, 0, 10, 4));
    assert_eq!(dims["bottom"], Dimensions::new(0, 4, 10, 4));
}

#[test]
fn test_remainder_goes_to_earliest_boxes() {
    let boxes = vec![
        LayoutBox::window("a").weight(1),
        LayoutBox::window("b").weight(1),
        LayoutBox::window("c").weight(1),
    ];

    assert_eq!(calc_sizes(&boxes, 11), vec![4, 4, 3]);
    assert_eq!(calc_sizes(&boxes, 10), vec![4, 3, 3]);
}

#[test]
fn test_static_sizes_subtracted_first() {
    let boxes = vec![
        LayoutBox::window("status").size(3),
        LayoutBox::window("files").weight(1),
        LayoutBox::window("branches").weight(1),
    ];

    assert_eq!(calc_sizes(&boxes, 23), vec![3, 10, 10]);
}

#[test]
fn test_static_sizes_clamped_to_available() {
    let boxes = vec![
        LayoutBox::window("a").size(5),
        LayoutBox::window("b").size(5),
        LayoutBox::window("c").weight(1),
    ];

    assert_eq!(calc_sizes(&boxes, 7), vec![5, 2, 0]);
}

#[test]
fn test_zero_weight_takes_nothing_among_siblings() {
    let boxes = vec![
        LayoutBox::window("side").weight(0),
        LayoutBox::window("main").weight(2),
    ];

    assert_eq!(calc_sizes(&boxes, 50), vec![0, 50]);
}

#[test]
fn test_lone_zero_weight_child_fills_parent() {
    let boxes = vec![LayoutBox::window("only")];

    assert_eq!(calc_sizes(&boxes, 17), vec![17]);
}

#[test]
fn test_normalize_weights() {
    assert_eq!(normalize_weights(&[2, 4, 4]), vec![1, 2, 2]);
    assert_eq!(normalize_weights(&[0, 3, 6]), vec![0, 1, 2]);
    assert_eq!(normalize_weights(&[1, 2]), vec![1, 2]);
    assert_eq!(normalize_weights(&[0, 0]), vec![0, 0]);
}

#[test]
fn test_conditional_children_see_resolved_extent() {
    let root = LayoutBox::split(
        Direction::Column,
        vec![
            LayoutBox::conditional(Direction::Row, |_width, height| {
                if height >= 10 {
                    vec![
                        LayoutBox::window("tall").weight(1),
                        LayoutBox::window("short").weight(1),
                    ]
                } else {
                    vec![
                        LayoutBox::window("tall").weight(1),
                        LayoutBox::window("short").size(1),
                    ]
                }
            })
            .weight(1),
            LayoutBox::window("main").weight(1),
        ],
    );

    let roomy = arrange_windows(&root, 0, 0, 20, 12);
    assert_eq!(roomy["tall"].height(), 6);
    assert_eq!(roomy["short"].height(), 6);

    let cramped = arrange_windows(&root, 0, 0, 20, 6);
    assert_eq!(cramped["tall"].height(), 5);
    assert_eq!(cramped["short"].height(), 1);
}

#[test]
fn test_nested_splits_tile_the_area() {
    let root = LayoutBox::split(
        Direction::Row,
        vec![
            LayoutBox::split(
                Direction::Column,
                vec![
                    LayoutBox::window("a").weight(1),
                    LayoutBox::window("b").weight(3),
                ],
            )
            .weight(1),
            LayoutBox::window("bar").size(1),
        ],
    );
    let dims = arrange_windows(&root, 0, 0, 37, 13);

    let total: u32 = dims.values().map(Dimensions::area).sum();
    assert_eq!(total, 37 * 13);

    assert_eq!(dims["a"].x1, dims["b"].x0);
    assert_eq!(dims["a"].y1, dims["bar"].y0);
    assert_eq!(dims["bar"], Dimensions::new(0, 12, 37, 1));
}

#[test]
fn test_zero_area_terminal() {
    let root = LayoutBox::split(
        Direction::Column,
        vec![
            LayoutBox::window("a").weight(1),
            LayoutBox::window("b").size(4),
        ],
    );
    let dims = arrange_windows(&root, 0, 0, 0, 0);

    assert_eq!(dims.len(), 2);
    assert!(dims.values().all(Dimensions::is_empty));
    assert!(dims.values().all(|d| d.x0 <= d.x1 && d.y0 <= d.y1));
}

#[test]
fn test_empty_split_produces_no_windows() {
    let root = LayoutBox::split(Direction::Row, Vec::new());
    assert!(arrange_windows(&root, 0, 0, 80, 24).is_empty());
}

#[test]
fn test_dimensions_convert_to_rect() {
    let rect: ratatui::layout::Rect = Dimensions::new(4, 5, 6, 7).into();
    assert_eq!(rect, ratatui::layout::Rect::new(4, 5, 6, 7));
}
