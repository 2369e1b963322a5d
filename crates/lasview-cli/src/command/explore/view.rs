use lasview_data::{
    describe::{ColumnSummary, TablePreview},
    nullity::{NullityMatrix, NullitySummary},
    resolve::{FillStrategy, ResolvedTable},
};
use lasview_plot::{
    axis::{AxisSpec, Scale},
    boxplot::{self, BoxplotPanel, MarkerStyle},
    log_track::{self, Track},
    palette::Rgb,
};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Color, Modifier, Style, Stylize as _},
    symbols::{Marker, merge::MergeStrategy},
    text::{Line, Span, Text},
    widgets::{
        Axis, Block, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph,
        StatefulWidget, Widget,
    },
};

use crate::session::{self, InputProvider as _};

use super::app::{ExplorerApp, View};

const PREVIEW_ROWS: usize = 10;
/// Shading for missing ratios 0, (0, 1/3], (1/3, 2/3], (2/3, 1), 1.
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

pub(super) fn draw(app: &ExplorerApp, frame: &mut Frame) {
    let [title_area, main_area, notice_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let tabs = [
        (View::Explore, "1 Explore"),
        (View::Boxplot, "2 Boxplot"),
        (View::LogTracks, "3 Log tracks"),
    ]
    .into_iter()
    .flat_map(|(view, label)| {
        let style = if view == app.view {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        [Span::styled(label, style), Span::raw("  ")]
    });
    let title = Line::from_iter(std::iter::once(format!("{}  ", app.title).bold()).chain(tabs));
    frame.render_widget(title, title_area);

    match app.view {
        View::Explore => draw_explore(app, frame, main_area),
        View::Boxplot => draw_boxplot(app, frame, main_area),
        View::LogTracks => draw_log_tracks(app, frame, main_area),
    }

    let notice = if let Some(prompt) = &app.prompt {
        Line::from(format!("{}: {}_", prompt.label(), prompt.input))
            .style(Style::default().fg(Color::Yellow))
    } else if let Some(notice) = &app.notice {
        Line::from(notice.as_str()).style(Style::default().fg(Color::Red))
    } else {
        Line::from(format!(
            "{} columns selected | {}",
            app.selection.len(),
            app.policy().describe()
        ))
        .style(Style::default().fg(Color::Gray))
    };
    frame.render_widget(notice, notice_area);

    let help = match app.view {
        _ if app.prompt.is_some() => "Enter: Apply | Backspace: Delete | Esc: Cancel",
        View::Explore => concat!(
            "↑/↓: Move | Space: Toggle | a: All columns | s: Strategy | f: Fixed value | ",
            "p: Policy | 1/2/3: View | q/Esc: Quit"
        ),
        View::Boxplot => "←/→: Move | l: Toggle log | p: Policy | 1/2/3: View | q/Esc: Quit",
        View::LogTracks => concat!(
            "↑/↓: Move | Space: Toggle track | l: Toggle log | y: Depth | x: x range | ",
            "r: Depth range | c: Clear ranges | p: Policy | 1/2/3: View | q/Esc: Quit"
        ),
    };
    let help_text = Text::from(help)
        .style(Style::default().fg(Color::DarkGray))
        .centered();
    frame.render_widget(help_text, help_area);
}

fn draw_explore(app: &ExplorerApp, frame: &mut Frame, area: Rect) {
    let [left_area, right_area] =
        Layout::horizontal([Constraint::Percentage(25), Constraint::Percentage(75)])
            .spacing(Spacing::Overlap(1))
            .areas(area);
    let [stats_pane, lower_pane] =
        Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1))
            .areas(right_area);
    let [nullity_pane, preview_pane] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .spacing(Spacing::Overlap(1))
            .areas(lower_pane);

    let entries = app
        .picker_entries()
        .into_iter()
        .map(|name| {
            let flag = app.strategy_for(name).map(strategy_flag).unwrap_or_default();
            (name.to_owned(), app.is_requested(name), flag)
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        ColumnPicker {
            title: "Columns",
            entries: &entries,
            cursor: app.cursor,
        },
        left_area,
    );
    frame.render_widget(
        SummaryTable {
            summaries: &app.summaries,
        },
        stats_pane,
    );
    frame.render_widget(
        NullityChart {
            nullity: &app.nullity,
            matrix: &app.matrix,
        },
        nullity_pane,
    );
    frame.render_widget(
        ResolvedPreview {
            resolved: app.resolved(),
        },
        preview_pane,
    );
}

fn draw_boxplot(app: &ExplorerApp, frame: &mut Frame, area: Rect) {
    let Some(resolved) = app.resolved() else {
        frame.render_widget(Message("No resolved data"), area);
        return;
    };
    let figure = match boxplot::render_boxplots(resolved, &app.boxplot_log) {
        Ok(figure) => figure,
        Err(e) => {
            frame.render_widget(Message(&e.to_string()), area);
            return;
        }
    };
    let areas = Layout::horizontal(vec![Constraint::Fill(1); figure.panels.len()])
        .spacing(Spacing::Overlap(1))
        .split(area);
    for (i, (panel, panel_area)) in figure.panels.iter().zip(areas.iter()).enumerate() {
        frame.render_widget(
            BoxplotPanelChart {
                panel,
                marker: figure.outlier_marker,
                selected: i == app.cursor,
            },
            *panel_area,
        );
    }
}

fn draw_log_tracks(app: &ExplorerApp, frame: &mut Frame, area: Rect) {
    let Some(resolved) = app.resolved() else {
        frame.render_widget(Message("No resolved data"), area);
        return;
    };
    let [picker_area, tracks_area] =
        Layout::horizontal([Constraint::Length(28), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1))
            .areas(area);

    let spec = session::plot_spec(resolved, app);
    let depth = app.current_depth_column();
    let entries = resolved
        .column_names()
        .map(|name| {
            let flags = [
                (Some(name) == depth, "depth"),
                (app.track_log.iter().any(|c| c == name), "log"),
                (app.has_range_override(name), "range"),
            ];
            let flag = flags
                .iter()
                .filter(|(set, _)| *set)
                .map(|(_, label)| *label)
                .collect::<Vec<_>>()
                .join(",");
            (name.to_owned(), spec.x_columns().iter().any(|c| c == name), flag)
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        ColumnPicker {
            title: "Tracks",
            entries: &entries,
            cursor: app.cursor,
        },
        picker_area,
    );

    let figure = match log_track::render_log_tracks(&spec) {
        Ok(figure) => figure,
        Err(e) => {
            frame.render_widget(Message(&e.to_string()), tracks_area);
            return;
        }
    };
    let areas = Layout::horizontal(vec![Constraint::Fill(1); figure.tracks.len()])
        .spacing(Spacing::Overlap(1))
        .split(tracks_area);
    for (track, track_area) in figure.tracks.iter().zip(areas.iter()) {
        frame.render_widget(
            TrackChart {
                track,
                y_axis: &figure.y_axis,
                y_title: &figure.y_column,
            },
            *track_area,
        );
    }
}

fn strategy_flag(strategy: FillStrategy) -> String {
    match strategy {
        FillStrategy::FixedValue(v) => format!("={v}"),
        _ => strategy.label().to_owned(),
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn line_dataset(data: &[(f64, f64)], color: Color) -> Dataset<'_> {
    Dataset::default()
        .graph_type(GraphType::Line)
        .marker(Marker::Braille)
        .style(Style::default().fg(color))
        .data(data)
}

fn tick_labels(axis: &AxisSpec, count: usize) -> Vec<String> {
    axis.ticks(count)
        .into_iter()
        .map(|v| format!("{v:.2}"))
        .collect()
}

struct Message<'a>(&'a str);

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.0)
            .style(Style::default().fg(Color::Red))
            .centered()
            .block(Block::bordered().merge_borders(MergeStrategy::Exact))
            .render(area, buf);
    }
}

/// Checkable list; each entry is `(name, checked, flag)`.
struct ColumnPicker<'a> {
    title: &'a str,
    entries: &'a [(String, bool, String)],
    cursor: usize,
}

impl Widget for ColumnPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self
            .entries
            .iter()
            .map(|(name, checked, flag)| {
                let mark = if *checked { "[x]" } else { "[ ]" };
                ListItem::new(format!("{mark} {name} {flag}"))
            })
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(self.title)
                    .merge_borders(MergeStrategy::Exact),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.cursor));

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

struct SummaryTable<'a> {
    summaries: &'a [ColumnSummary],
}

impl Widget for SummaryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fmt = |v: Option<f64>| v.map_or("-".to_string(), |v| format!("{v:.2}"));
        let mut lines = vec![
            Line::raw(format!(
                "{:<10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
                "Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"
            ))
            .bold(),
        ];
        lines.extend(self.summaries.iter().map(|s| {
            let stats = s.stats.as_ref();
            Line::raw(format!(
                "{:<10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
                s.name,
                s.count,
                fmt(stats.map(|s| s.mean)),
                fmt(stats.map(|s| s.sample_std_dev).filter(|s| !s.is_nan())),
                fmt(stats.map(|s| s.min)),
                fmt(s.quartile(25.0)),
                fmt(s.quartile(50.0)),
                fmt(s.quartile(75.0)),
                fmt(stats.map(|s| s.max)),
            ))
        }));
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title("Statistics")
                    .merge_borders(MergeStrategy::Exact),
            )
            .render(area, buf);
    }
}

struct NullityChart<'a> {
    nullity: &'a NullitySummary,
    matrix: &'a NullityMatrix,
}

impl Widget for NullityChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(
                "Missing values ({}/{} rows complete)",
                self.nullity.complete_rows, self.nullity.row_count
            ))
            .merge_borders(MergeStrategy::Exact);
        let [counts_area, matrix_area] =
            Layout::horizontal([Constraint::Length(26), Constraint::Fill(1)])
                .areas(block.inner(area));

        let counts = self
            .nullity
            .columns
            .iter()
            .map(|c| {
                Line::raw(format!(
                    "{:<10} {:>6} {:>5.1}%",
                    c.name,
                    c.missing,
                    c.missing_ratio() * 100.0
                ))
            })
            .collect::<Vec<_>>();

        // One text row per band, one character per column.
        let rows = (0..self.matrix.bands.len())
            .map(|band| {
                let cells = self
                    .matrix
                    .cells
                    .iter()
                    .map(|column| shade(column[band]))
                    .collect::<String>();
                Line::raw(cells)
            })
            .collect::<Vec<_>>();

        block.render(area, buf);
        Paragraph::new(counts).render(counts_area, buf);
        Paragraph::new(rows).render(matrix_area, buf);
    }
}

fn shade(ratio: f64) -> char {
    if ratio <= 0.0 {
        SHADES[0]
    } else if ratio >= 1.0 {
        SHADES[4]
    } else if ratio <= 1.0 / 3.0 {
        SHADES[1]
    } else if ratio <= 2.0 / 3.0 {
        SHADES[2]
    } else {
        SHADES[3]
    }
}

struct ResolvedPreview<'a> {
    resolved: Option<&'a ResolvedTable>,
}

impl Widget for ResolvedPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Resolved data")
            .merge_borders(MergeStrategy::Exact);
        let Some(resolved) = self.resolved else {
            Paragraph::new("Resolution failed").block(block).render(area, buf);
            return;
        };

        let preview = TablePreview::head(&resolved.to_table(), PREVIEW_ROWS);
        let mut lines = vec![
            Line::raw(format!("{} rows", resolved.row_count())),
            Line::raw(
                std::iter::once(format!("{:>6}", "#"))
                    .chain(preview.column_names.iter().map(|n| format!("{n:>10}")))
                    .collect::<Vec<_>>()
                    .join(" "),
            )
            .bold(),
        ];
        lines.extend(preview.index.iter().zip(&preview.rows).map(|(index, row)| {
            let values = row
                .iter()
                .map(|v| v.map_or(format!("{:>10}", "-"), |v| format!("{v:>10.2}")));
            Line::raw(
                std::iter::once(format!("{index:>6}"))
                    .chain(values)
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        }));
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

struct BoxplotPanelChart<'a> {
    panel: &'a BoxplotPanel,
    marker: MarkerStyle,
    selected: bool,
}

impl Widget for BoxplotPanelChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let axis = &self.panel.y_axis;
        let title = Line::from(self.panel.title.text.as_str()).centered();
        let title = if self.panel.title.bold { title.bold() } else { title };
        let border = if self.selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::bordered()
            .title(title)
            .border_style(border)
            .merge_borders(MergeStrategy::Exact);

        let Some(glyph) = &self.panel.glyph else {
            Paragraph::new("no data").centered().block(block).render(area, buf);
            return;
        };

        let points = |pts: &[(f64, f64)]| {
            pts.iter()
                .filter_map(|&(x, v)| Some((x, axis.fraction(v)?)))
                .collect::<Vec<_>>()
        };
        let outline = points(&[
            (0.3, glyph.q1),
            (0.7, glyph.q1),
            (0.7, glyph.q3),
            (0.3, glyph.q3),
            (0.3, glyph.q1),
        ]);
        let median = points(&[(0.3, glyph.median), (0.7, glyph.median)]);
        let upper = points(&[
            (0.5, glyph.q3),
            (0.5, glyph.whisker_high),
            (0.4, glyph.whisker_high),
            (0.6, glyph.whisker_high),
        ]);
        let lower = points(&[
            (0.5, glyph.q1),
            (0.5, glyph.whisker_low),
            (0.4, glyph.whisker_low),
            (0.6, glyph.whisker_low),
        ]);
        let outliers = glyph
            .outliers
            .iter()
            .filter_map(|&v| Some((0.5, axis.fraction(v)?)))
            .collect::<Vec<_>>();

        let datasets = vec![
            line_dataset(&outline, Color::Cyan),
            line_dataset(&median, Color::White),
            line_dataset(&upper, Color::Cyan),
            line_dataset(&lower, Color::Cyan),
            Dataset::default()
                .graph_type(GraphType::Scatter)
                .marker(Marker::Dot)
                .style(
                    Style::default()
                        .fg(color(self.marker.fill))
                        .bg(color(self.marker.edge)),
                )
                .data(&outliers),
        ];

        let scale = match axis.scale {
            Scale::Linear => "",
            Scale::Log => "log",
        };
        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(Axis::default().bounds([0.0, 1.0]).title(scale))
            .y_axis(
                Axis::default()
                    .bounds([0.0, 1.0])
                    .labels(tick_labels(axis, 3)),
            );
        chart.render(area, buf);
    }
}

struct TrackChart<'a> {
    track: &'a Track,
    y_axis: &'a AxisSpec,
    y_title: &'a str,
}

impl Widget for TrackChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let track = self.track;
        let range = track.x_axis.range;
        let scale = match track.x_axis.scale {
            Scale::Linear => "",
            Scale::Log => " log",
        };
        // Column name and x-range sit above the track.
        let title = Line::from(format!(
            "{}{scale} [{:.2}, {:.2}]",
            track.column, range.from, range.to
        ))
        .centered()
        .bold();

        let data = track
            .points
            .iter()
            .filter_map(|&(x, depth)| {
                Some((track.x_axis.fraction(x)?, self.y_axis.fraction(depth)?))
            })
            .collect::<Vec<_>>();
        let dataset = line_dataset(&data, color(track.color));

        let y_axis = Axis::default().bounds([0.0, 1.0]);
        let y_axis = if track.show_y_tick_labels {
            y_axis.title(self.y_title).labels(tick_labels(self.y_axis, 5))
        } else {
            y_axis
        };
        let chart = Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .title(title)
                    .merge_borders(MergeStrategy::Exact),
            )
            .x_axis(Axis::default().bounds([0.0, 1.0]))
            .y_axis(y_axis);
        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_buckets() {
        assert_eq!(shade(0.0), ' ');
        assert_eq!(shade(0.2), '░');
        assert_eq!(shade(0.5), '▒');
        assert_eq!(shade(0.9), '▓');
        assert_eq!(shade(1.0), '█');
    }

    #[test]
    fn test_strategy_flag() {
        assert_eq!(strategy_flag(FillStrategy::Median), "median");
        assert_eq!(strategy_flag(FillStrategy::FixedValue(2.65)), "=2.65");
    }
}
