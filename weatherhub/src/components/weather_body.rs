//! Body of the main view, one layout per lookup state

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weatherhub_core::{AppState, LookupError, UiState, WeatherSnapshot};

use super::{
    Component, Details, DetailsProps, LocationHeader, LocationHeaderProps, ERROR_ICON, SPINNERS,
};
use crate::theme::Palette;

pub const WELCOME_TEXT: &str = "Search for a city or use your location";
pub const LOADING_TEXT: &str = "Fetching weather...";

/// Maximum width of the details grid
const DETAILS_WIDTH: u16 = 84;

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
    pub palette: &'a Palette,
}

enum WeatherView<'a> {
    Welcome,
    Loading,
    Failed {
        error: &'a LookupError,
        retained: Option<&'a WeatherSnapshot>,
    },
    Ready(&'a WeatherSnapshot),
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.ui {
            UiState::Idle => WeatherView::Welcome,
            UiState::Loading { .. } => WeatherView::Loading,
            UiState::Failed { error, retained } => WeatherView::Failed {
                error,
                retained: retained.as_ref(),
            },
            UiState::Loaded(snapshot) => WeatherView::Ready(snapshot),
        }
    }
}

enum BodyBlock<'a> {
    Line(Line<'a>),
    Header(&'a WeatherSnapshot),
    Details(&'a WeatherSnapshot),
}

impl BodyBlock<'_> {
    fn height(&self) -> u16 {
        match self {
            BodyBlock::Line(_) => 1,
            BodyBlock::Header(_) => LocationHeader::HEIGHT,
            BodyBlock::Details(snapshot) => Details::height(snapshot),
        }
    }

    fn render(self, frame: &mut Frame, area: Rect, props: &WeatherBodyProps<'_>) {
        match self {
            BodyBlock::Line(line) => frame.render_widget(Paragraph::new(line), area),
            BodyBlock::Header(snapshot) => LocationHeader.render(
                frame,
                area,
                LocationHeaderProps {
                    snapshot,
                    palette: props.palette,
                },
            ),
            BodyBlock::Details(snapshot) => {
                let [area] = Layout::horizontal([Constraint::Max(DETAILS_WIDTH)])
                    .flex(Flex::Center)
                    .areas(area);
                Details.render(
                    frame,
                    area,
                    DetailsProps {
                        snapshot,
                        unit: props.state.unit,
                        palette: props.palette,
                    },
                );
            }
        }
    }
}

fn blank_line<'a>() -> BodyBlock<'a> {
    BodyBlock::Line(Line::from(""))
}

fn hint<'a>(palette: &Palette, key: &'a str, text: &'a str) -> BodyBlock<'a> {
    BodyBlock::Line(
        Line::from(vec![
            Span::styled("Press ", palette.muted()),
            Span::styled(key, palette.accent()),
            Span::styled(text, palette.muted()),
        ])
        .centered(),
    )
}

fn snapshot_blocks<'a>(
    snapshot: &'a WeatherSnapshot,
    state: &AppState,
    palette: &Palette,
) -> Vec<BodyBlock<'a>> {
    let category = snapshot.category();
    vec![
        BodyBlock::Header(snapshot),
        blank_line(),
        BodyBlock::Line(
            Line::from(vec![
                Span::raw(format!("{} ", category.icon())),
                Span::styled(state.unit.format(snapshot.temperature), palette.accent()),
            ])
            .centered(),
        ),
        BodyBlock::Line(Line::styled(snapshot.headline(), palette.base()).centered()),
        blank_line(),
        BodyBlock::Details(snapshot),
    ]
}

fn blocks_for_state<'a>(state: &'a AppState, palette: &Palette) -> Vec<BodyBlock<'a>> {
    match WeatherView::from_state(state) {
        WeatherView::Welcome => vec![
            BodyBlock::Line(Line::styled("🌤  Welcome to WeatherHub", palette.base().bold()).centered()),
            blank_line(),
            BodyBlock::Line(Line::styled(WELCOME_TEXT, palette.base()).centered()),
            blank_line(),
            hint(palette, "/", " to search or l to use your location"),
        ],
        WeatherView::Loading => {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            vec![BodyBlock::Line(
                Line::from(vec![
                    Span::styled(spinner, palette.accent()),
                    Span::styled(format!(" {LOADING_TEXT}"), palette.muted()),
                ])
                .centered(),
            )]
        }
        WeatherView::Failed { error, retained } => {
            let mut blocks = vec![BodyBlock::Line(
                Line::from(vec![
                    Span::raw(format!("{ERROR_ICON} ")),
                    Span::styled(error.user_message(), palette.error()),
                ])
                .centered(),
            )];
            match retained {
                Some(snapshot) => {
                    blocks.push(blank_line());
                    blocks.extend(snapshot_blocks(snapshot, state, palette));
                }
                None => {
                    blocks.push(blank_line());
                    blocks.push(hint(palette, "r", " to retry or / to search"));
                }
            }
            blocks
        }
        WeatherView::Ready(snapshot) => snapshot_blocks(snapshot, state, palette),
    }
}

impl Component for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let blocks = blocks_for_state(props.state, props.palette);
        let constraints: Vec<_> = blocks
            .iter()
            .map(|block| Constraint::Length(block.height()))
            .collect();
        let areas = Layout::vertical(constraints).flex(Flex::Center).split(area);

        for (block, area) in blocks.into_iter().zip(areas.iter().copied()) {
            block.render(frame, area, &props);
        }
    }
}
