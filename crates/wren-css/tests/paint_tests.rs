//! Integration tests for painting, hit testing and snapshots.

use std::cell::RefCell;
use std::rc::Rc;

use wren_common::image::LoadedImage;
use wren_common::resource::{NullResolver, ResourceError, ResourceResolver};
use wren_css::{
    ApproximateFontMetrics, Brush, Color, ContainerOptions, DisplayCommand, DisplayList,
    InitialContainer, Point, Size,
};

/// Records every link it is asked to follow.
#[derive(Default, Clone)]
struct RecordingResolver {
    followed: Rc<RefCell<Vec<String>>>,
}

impl ResourceResolver for RecordingResolver {
    fn image(&self, src: &str) -> Result<LoadedImage, ResourceError> {
        Err(ResourceError::Unsupported(src.to_string()))
    }

    fn stylesheet(&self, href: &str) -> Result<String, ResourceError> {
        match href {
            "site.css" => Ok("p { color: red }".to_string()),
            _ => Err(ResourceError::Unsupported(href.to_string())),
        }
    }

    fn activate_link(&self, href: &str) -> Result<(), ResourceError> {
        self.followed.borrow_mut().push(href.to_string());
        Ok(())
    }
}

fn painted(document: &str) -> (InitialContainer, DisplayList) {
    let mut c = InitialContainer::from_document(
        document,
        ContainerOptions::default(),
        Box::new(NullResolver),
    );
    c.measure(&ApproximateFontMetrics, Size::new(400.0, 300.0));
    let mut list = DisplayList::new();
    c.paint(&mut list, &ApproximateFontMetrics);
    (c, list)
}

fn polygon_colors(list: &DisplayList) -> Vec<Color> {
    list.commands()
        .iter()
        .filter_map(|c| match c {
            DisplayCommand::FillPolygon { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

// ========== Display list ==========

#[test]
fn test_background_then_text() {
    let (_, list) = painted("<div style=\"background-color: red\">hello</div>");

    let background = list
        .commands()
        .iter()
        .position(|c| {
            matches!(c, DisplayCommand::FillRect { brush: Brush::Solid(color), .. }
                if *color == Color::rgb(255, 0, 0))
        })
        .unwrap();
    let text = list
        .commands()
        .iter()
        .position(|c| matches!(c, DisplayCommand::DrawText { text, .. } if text == "hello"))
        .unwrap();
    assert!(background < text);
}

#[test]
fn test_transparent_background_paints_nothing() {
    let (_, list) = painted("<div>x</div>");
    assert!(!list
        .commands()
        .iter()
        .any(|c| matches!(c, DisplayCommand::FillRect { .. })));
}

#[test]
fn test_gradient_background() {
    let (_, list) = painted(
        "<div style=\"background-color: white; background-gradient: black; background-gradient-angle: 45\">x</div>",
    );
    assert!(list.commands().iter().any(|c| matches!(
        c,
        DisplayCommand::FillRect { brush: Brush::LinearGradient { from, to, .. }, .. }
            if *from == Color::WHITE && *to == Color::BLACK
    )));
}

#[test]
fn test_hidden_boxes_are_not_painted() {
    let (_, list) = painted("<div style=\"display: none\">secret</div><p>shown</p>");
    let texts: Vec<&str> = list.texts().collect();
    assert_eq!(texts, vec!["shown"]);
}

// ========== Borders ==========

#[test]
fn test_inset_border_darkens_top_and_left() {
    let (_, list) = painted("<div style=\"border: 2px inset #808080\">x</div>");

    let normal = Color::rgb(128, 128, 128);
    let dark = Color::rgb(64, 64, 64);
    // Top, right, bottom, left.
    assert_eq!(polygon_colors(&list), vec![dark, normal, normal, dark]);
}

#[test]
fn test_outset_border_darkens_right_and_bottom() {
    let (_, list) = painted("<div style=\"border: 2px outset #808080\">x</div>");

    let normal = Color::rgb(128, 128, 128);
    let dark = Color::rgb(64, 64, 64);
    assert_eq!(polygon_colors(&list), vec![normal, dark, dark, normal]);
}

#[test]
fn test_border_without_style_is_not_painted() {
    let (_, list) = painted("<div style=\"border-width: 2px\">x</div>");
    assert!(polygon_colors(&list).is_empty());
}

// ========== Decoration ==========

#[test]
fn test_underline_is_drawn_below_text() {
    let (c, list) = painted("<p><u>under</u></p>");

    let line = list
        .commands()
        .iter()
        .find_map(|c| match c {
            DisplayCommand::DrawLine { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .unwrap();
    assert!((line.0.y - line.1.y).abs() < f32::EPSILON);
    assert!(line.1.x > line.0.x);

    let top = list
        .commands()
        .iter()
        .find_map(|c| match c {
            DisplayCommand::DrawText { origin, .. } => Some(origin.y),
            _ => None,
        })
        .unwrap();
    assert!(line.0.y > top);
    assert!(c.maximum_size().height > 0.0);
}

// ========== Links ==========

#[test]
fn test_link_regions_follow_paint() {
    let resolver = RecordingResolver::default();
    let followed = Rc::clone(&resolver.followed);
    let mut c = InitialContainer::from_document(
        "<p><a href=\"next.html\">next</a></p>",
        ContainerOptions::default(),
        Box::new(resolver),
    );
    c.measure(&ApproximateFontMetrics, Size::new(400.0, 300.0));
    assert!(c.link_regions().is_empty());

    let mut list = DisplayList::new();
    c.paint(&mut list, &ApproximateFontMetrics);
    let (link, rect) = c.link_regions()[0];
    let inside = Point::new(rect.x + 1.0, rect.y + 1.0);

    assert_eq!(c.link_at(inside), Some(link));
    assert_eq!(c.link_at(Point::new(399.0, 299.0)), None);

    assert_eq!(c.activate_link(inside).unwrap().as_deref(), Some("next.html"));
    assert_eq!(c.activate_link(Point::new(399.0, 299.0)).unwrap(), None);
    assert_eq!(*followed.borrow(), vec!["next.html".to_string()]);
}

#[test]
fn test_scroll_offset_moves_link_regions() {
    let mut c = InitialContainer::from_document(
        "<p><a href=\"x\">x</a></p>",
        ContainerOptions::default(),
        Box::new(NullResolver),
    );
    c.measure(&ApproximateFontMetrics, Size::new(400.0, 300.0));

    let mut list = DisplayList::new();
    c.paint(&mut list, &ApproximateFontMetrics);
    let before = c.link_regions()[0].1;

    c.set_scroll_offset(Point::new(0.0, -10.0));
    c.paint(&mut list, &ApproximateFontMetrics);
    let after = c.link_regions()[0].1;

    assert!((before.y - after.y - 10.0).abs() < 1e-3);
}

// ========== Resources ==========

#[test]
fn test_linked_style_sheet_is_loaded() {
    let c = InitialContainer::from_document(
        "<link rel=stylesheet href=site.css><p>x</p>",
        ContainerOptions::default(),
        Box::new(RecordingResolver::default()),
    );
    let snapshot = c.snapshot();
    let p = snapshot.find_tag("p").unwrap();
    assert_eq!(c.tree().actual_color(wren_css::BoxId(p.id)), Color::rgb(255, 0, 0));
}

// ========== Snapshots ==========

#[test]
fn test_snapshot_serializes_measured_tree() {
    let (c, _) = painted("<p>hi</p>");
    let snapshot = c.snapshot();

    let p = snapshot.find_tag("p").unwrap();
    assert_eq!(p.display, "block");
    assert!(p.bounds.width > 0.0);

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"kind\":\"normal\""));
    assert!(json.contains("\"text\":\"hi\""));
}
