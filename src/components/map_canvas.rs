use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block,
        canvas::{Canvas, Map, MapResolution},
    },
};

use super::Component;
use crate::action::Action;
use crate::geo::{self, ATTRIBUTION, MARKER_GLYPH};
use crate::state::MapViewState;

/// World base layer with the address marker and its popup
pub struct MapCanvas;

pub struct MapCanvasProps<'a> {
    pub map: &'a MapViewState,
    pub title: &'a str,
    pub is_focused: bool,
}

impl Component<Action> for MapCanvas {
    type Props<'a> = MapCanvasProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::bordered()
            .border_style(Style::default().fg(border))
            .title(Line::from(format!(" {} ", props.title)).bold())
            .title_bottom(
                Line::from(Span::styled(
                    format!(" {ATTRIBUTION} "),
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            );

        let map = props.map;
        if !map.initialized {
            frame.render_widget(block, area);
            return;
        }

        let inner = block.inner(area);
        let bounds = geo::viewport_bounds(map.center, map.zoom, inner.width, inner.height);
        let marker = map.marker_visible().then_some(map.marker_position);
        let popup = map
            .popup
            .as_ref()
            .filter(|popup| popup.open)
            .map(|popup| strip_tags(&popup.html));
        let popup_offset = geo::row_degrees(map.zoom);

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(bounds.0)
            .y_bounds(bounds.1)
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: Color::Rgb(70, 110, 90),
                    resolution: MapResolution::High,
                });
                let Some(position) = marker else {
                    return;
                };
                ctx.layer();
                ctx.print(
                    position.lon,
                    position.lat,
                    Span::styled(MARKER_GLYPH, Style::default().fg(Color::Red).bold()),
                );
                if let Some(text) = &popup {
                    if geo::contains(&bounds, position) {
                        ctx.print(
                            position.lon,
                            position.lat + popup_offset,
                            Span::styled(
                                text.clone(),
                                Style::default().fg(Color::Black).bg(Color::White),
                            ),
                        );
                    }
                }
            });
        frame.render_widget(canvas, area);
    }
}

/// Popups carry HTML; the terminal only shows its decoded text.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    htmlize::unescape(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use crate::state::{GeoPosition, Popup};
    use tui_dispatch::testing::*;

    fn mounted_map() -> MapViewState {
        let mut map = MapViewState::new(Locale::En);
        map.initialized = true;
        map.zoom = 3;
        map.center = GeoPosition::new(48.8566, 2.3522);
        map.marker_position = map.center;
        map
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>Cabinet</b>  <i>infirmier</i>"), "Cabinet infirmier");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(
            strip_tags("<b>Infirmi&egrave;re</b> &amp; soins &eacute;t&eacute;"),
            "Infirmière & soins été"
        );
        // Escaped markup is text, not a tag.
        assert_eq!(strip_tags("&lt;b&gt; 5 &#8364;"), "<b> 5 €");
    }

    #[test]
    fn test_render_marker_and_attribution() {
        let mut render = RenderHarness::new(80, 20);
        let mut component = MapCanvas;
        let map = mounted_map();

        let output = render.render_to_string_plain(|frame| {
            let props = MapCanvasProps {
                map: &map,
                title: "Paris",
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains(MARKER_GLYPH), "marker missing:\n{output}");
        assert!(output.contains("OpenStreetMap"), "attribution missing:\n{output}");
        assert!(output.contains("Paris"));
    }

    #[test]
    fn test_render_popup_text() {
        let mut render = RenderHarness::new(80, 20);
        let mut component = MapCanvas;
        let mut map = mounted_map();
        map.popup = Some(Popup {
            html: "<b>Cabinet</b>".into(),
            open: true,
        });

        let output = render.render_to_string_plain(|frame| {
            let props = MapCanvasProps {
                map: &map,
                title: "Paris",
                is_focused: false,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Cabinet"), "popup missing:\n{output}");
    }

    #[test]
    fn test_render_hides_marker_on_error() {
        let mut render = RenderHarness::new(80, 20);
        let mut component = MapCanvas;
        let mut map = mounted_map();
        map.error_message = "Invalid address.".into();

        let output = render.render_to_string_plain(|frame| {
            let props = MapCanvasProps {
                map: &map,
                title: "",
                is_focused: false,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(!output.contains(MARKER_GLYPH));
    }
}
