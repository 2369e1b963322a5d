use std::collections::BTreeMap;

use anyhow::Context as _;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use lasview_data::{
    describe::{self, ColumnSummary},
    nullity::{NullityMatrix, NullitySummary},
    resolve::{FillStrategy, Imputation, ResolutionPolicy, ResolvedTable},
    selection::{ALL_COLUMNS, Selection},
    table::Table,
};
use lasview_plot::axis::AxisRange;
use ratatui::Frame;

use crate::{
    session::{InputProvider, Pipeline, SessionInputs},
    tui::App,
};

use super::view;

/// Row bands in the nullity matrix.
const NULLITY_BANDS: usize = 40;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    #[default]
    Explore,
    Boxplot,
    LogTracks,
}

/// Policies reachable with `p`, in cycling order.
fn preset_policies() -> Vec<ResolutionPolicy> {
    vec![
        ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Mean)),
        ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Median)),
        ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Zero)),
        ResolutionPolicy::DeleteRows,
    ]
}

/// Strategy after `s`; a fixed value goes back to the mean.
fn next_strategy(strategy: FillStrategy) -> FillStrategy {
    match strategy {
        FillStrategy::Mean => FillStrategy::Median,
        FillStrategy::Median => FillStrategy::Zero,
        FillStrategy::Zero | FillStrategy::FixedValue(_) => FillStrategy::Mean,
    }
}

/// Setting edited by a pending text entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PromptTarget {
    /// Fixed fill value for one column, or for every column when `None`.
    FillValue(Option<String>),
    TrackRange(String),
    DepthRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Prompt {
    pub(super) target: PromptTarget,
    pub(super) input: String,
}

impl Prompt {
    fn new(target: PromptTarget) -> Self {
        Self {
            target,
            input: String::new(),
        }
    }

    pub(super) fn label(&self) -> String {
        match &self.target {
            PromptTarget::FillValue(Some(column)) => format!("Fill value for {column}"),
            PromptTarget::FillValue(None) => "Fill value for all columns".to_owned(),
            PromptTarget::TrackRange(column) => format!("x range for {column} (min,max)"),
            PromptTarget::DepthRange(column) => format!("Depth range for {column} (min,max)"),
        }
    }
}

fn parse_value(text: &str) -> anyhow::Result<f64> {
    let text = text.trim();
    let value = text
        .parse::<f64>()
        .with_context(|| format!("Invalid number {text:?}"))?;
    anyhow::ensure!(value.is_finite(), "{value} is not a finite number");
    Ok(value)
}

/// Parses `"min,max"` with `min < max`.
fn parse_range(text: &str) -> anyhow::Result<(f64, f64)> {
    let (min, max) = text
        .split_once(',')
        .with_context(|| format!("Expected \"min,max\", got {:?}", text.trim()))?;
    let (min, max) = (parse_value(min)?, parse_value(max)?);
    anyhow::ensure!(min < max, "Range minimum {min} must be below maximum {max}");
    Ok((min, max))
}

#[derive(Debug)]
pub struct ExplorerApp {
    pub(super) title: String,
    pipeline: Pipeline,
    pub(super) summaries: Vec<ColumnSummary>,
    pub(super) nullity: NullitySummary,
    pub(super) matrix: NullityMatrix,
    pub(super) view: View,
    pub(super) cursor: usize,
    requested: Vec<String>,
    pub(super) selection: Selection,
    policy: ResolutionPolicy,
    pub(super) boxplot_log: Vec<String>,
    track_columns: Option<Vec<String>>,
    depth_column: Option<String>,
    pub(super) track_log: Vec<String>,
    track_ranges: BTreeMap<String, AxisRange>,
    /// Depth-axis overrides keyed by the depth column they were set for.
    depth_ranges: BTreeMap<String, AxisRange>,
    pub(super) prompt: Option<Prompt>,
    pub(super) notice: Option<String>,
    should_exit: bool,
}

impl ExplorerApp {
    pub fn new(title: String, table: Table, inputs: &SessionInputs) -> Self {
        let mut app = Self {
            title,
            summaries: describe::describe(&table),
            nullity: NullitySummary::from_table(&table),
            matrix: NullityMatrix::from_table(&table, NULLITY_BANDS),
            pipeline: Pipeline::new(table),
            view: View::default(),
            cursor: 0,
            requested: inputs.requested_columns().to_vec(),
            selection: Selection::default(),
            policy: inputs.policy().clone(),
            boxplot_log: inputs.boxplot_log_columns().to_vec(),
            track_columns: inputs.track_columns().map(<[String]>::to_vec),
            depth_column: inputs.depth_column().map(str::to_owned),
            track_log: inputs.track_log_columns().to_vec(),
            track_ranges: inputs.track_ranges(),
            depth_ranges: BTreeMap::new(),
            prompt: None,
            notice: None,
            should_exit: false,
        };
        app.refresh();
        // The session's depth range belongs to the depth column it names.
        if let Some(range) = inputs.depth_range()
            && let Some(column) = inputs
                .depth_column()
                .or_else(|| app.current_depth_column())
                .map(str::to_owned)
            && app.resolved().is_some_and(|r| r.column(&column).is_some())
        {
            app.depth_ranges.insert(column, range);
        }
        app
    }

    pub(super) fn table(&self) -> &Table {
        self.pipeline.table()
    }

    pub(super) fn resolved(&self) -> Option<&ResolvedTable> {
        self.pipeline.cached()
    }

    pub(super) fn is_requested(&self, name: &str) -> bool {
        self.requested.iter().any(|r| r == name)
    }

    pub(super) fn current_depth_column(&self) -> Option<&str> {
        self.depth_column
            .as_deref()
            .or_else(|| self.resolved()?.column_names().next())
    }

    pub(super) fn has_range_override(&self, name: &str) -> bool {
        self.track_ranges.contains_key(name) || self.depth_ranges.contains_key(name)
    }

    /// Fill strategy applied to `name`; [`ALL_COLUMNS`] answers for a global
    /// imputation only.
    pub(super) fn strategy_for(&self, name: &str) -> Option<FillStrategy> {
        match &self.policy {
            ResolutionPolicy::DeleteRows => None,
            ResolutionPolicy::Impute(Imputation::Global(strategy)) => Some(*strategy),
            ResolutionPolicy::Impute(Imputation::PerColumn(_)) if name == ALL_COLUMNS => None,
            ResolutionPolicy::Impute(Imputation::PerColumn(map)) => map.get(name).copied(),
        }
    }

    /// Entries of the column picker: the "all columns" entry, then every column.
    pub(super) fn picker_entries(&self) -> Vec<&str> {
        std::iter::once(ALL_COLUMNS)
            .chain(self.table().column_names())
            .collect()
    }

    /// Column under the explore cursor, `None` on the "all columns" entry.
    fn picker_column(&self) -> Option<String> {
        self.picker_entries()
            .get(self.cursor)
            .filter(|name| **name != ALL_COLUMNS)
            .map(|name| (*name).to_owned())
    }

    fn item_count(&self) -> usize {
        match self.view {
            View::Explore => self.table().column_count() + 1,
            View::Boxplot | View::LogTracks => {
                self.resolved().map_or(0, ResolvedTable::column_count)
            }
        }
    }

    fn resolved_column_at_cursor(&self) -> Option<String> {
        self.resolved()?
            .columns()
            .get(self.cursor)
            .map(|c| c.name().to_owned())
    }

    /// Re-runs selection and resolution, then drops view settings that refer
    /// to columns no longer resolved.
    fn refresh(&mut self) {
        self.notice = None;
        match self.pipeline.select(&self.requested) {
            Ok(selection) => self.selection = selection,
            Err(e) => self.notice = Some(format!("{e}; keeping previous selection")),
        }
        let names = match self.pipeline.resolve(&self.selection, &self.policy) {
            Ok(resolved) => resolved.column_names().map(str::to_owned).collect::<Vec<_>>(),
            Err(e) => {
                self.notice = Some(e.to_string());
                vec![]
            }
        };
        let known = |c: &String| names.contains(c);
        self.boxplot_log.retain(known);
        self.track_log.retain(known);
        if let Some(tracks) = &mut self.track_columns {
            tracks.retain(known);
        }
        if self.depth_column.as_ref().is_some_and(|d| !known(d)) {
            self.depth_column = None;
        }
        self.track_ranges.retain(|c, _| known(c));
        self.depth_ranges.retain(|c, _| known(c));
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.item_count().saturating_sub(1));
    }

    fn move_cursor(&mut self, forward: bool) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % count
        } else {
            self.cursor.checked_sub(1).unwrap_or(count - 1)
        };
    }

    fn switch_view(&mut self, view: View) {
        self.view = view;
        self.cursor = 0;
    }

    fn toggle_requested(&mut self) {
        let Some(name) = self.picker_entries().get(self.cursor).map(|s| (*s).to_owned()) else {
            return;
        };
        toggle(&mut self.requested, name);
        self.refresh();
    }

    fn toggle_track(&mut self) {
        let Some(name) = self.resolved_column_at_cursor() else {
            return;
        };
        let defaults = self
            .resolved()
            .map(crate::session::default_track_columns)
            .unwrap_or_default();
        toggle(self.track_columns.get_or_insert(defaults), name);
    }

    fn toggle_log(&mut self) {
        let Some(name) = self.resolved_column_at_cursor() else {
            return;
        };
        match self.view {
            View::Boxplot => toggle(&mut self.boxplot_log, name),
            View::LogTracks => toggle(&mut self.track_log, name),
            View::Explore => {}
        }
    }

    fn cycle_policy(&mut self) {
        let mut presets = preset_policies();
        let next = presets
            .iter()
            .position(|p| *p == self.policy)
            .map_or(0, |i| (i + 1) % presets.len());
        self.policy = presets.swap_remove(next);
        self.refresh();
    }

    /// Per-column strategies covering every table column, seeded from the
    /// current policy.
    fn per_column_strategies(&self) -> BTreeMap<String, FillStrategy> {
        let base = match &self.policy {
            ResolutionPolicy::Impute(Imputation::Global(strategy)) => *strategy,
            _ => FillStrategy::Mean,
        };
        let mut map = self
            .table()
            .column_names()
            .map(|name| (name.to_owned(), base))
            .collect::<BTreeMap<_, _>>();
        if let ResolutionPolicy::Impute(Imputation::PerColumn(current)) = &self.policy {
            map.extend(current.iter().map(|(name, s)| (name.clone(), *s)));
        }
        map
    }

    /// Sets the strategy for the picker column, or the global one on the
    /// "all columns" entry.
    fn set_strategy(&mut self, column: Option<String>, strategy: FillStrategy) {
        self.policy = match column {
            Some(column) => {
                let mut map = self.per_column_strategies();
                map.insert(column, strategy);
                ResolutionPolicy::Impute(Imputation::PerColumn(map))
            }
            None => ResolutionPolicy::Impute(Imputation::Global(strategy)),
        };
        self.refresh();
    }

    fn cycle_strategy(&mut self) {
        let column = self.picker_column();
        let current = self.strategy_for(column.as_deref().unwrap_or(ALL_COLUMNS));
        self.set_strategy(column, current.map_or(FillStrategy::Mean, next_strategy));
    }

    fn clear_ranges(&mut self) {
        if let Some(name) = self.resolved_column_at_cursor() {
            self.track_ranges.remove(&name);
            self.depth_ranges.remove(&name);
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        let input = prompt.input.as_str();
        let result = match prompt.target {
            PromptTarget::FillValue(column) => parse_value(input).map(|value| {
                self.set_strategy(column, FillStrategy::FixedValue(value));
            }),
            PromptTarget::TrackRange(column) => parse_range(input).map(|(min, max)| {
                self.track_ranges.insert(column, AxisRange::new(min, max));
            }),
            PromptTarget::DepthRange(column) => parse_range(input).map(|(min, max)| {
                self.depth_ranges.insert(column, AxisRange::new(max, min));
            }),
        };
        if let Err(e) = result {
            self.notice = Some(format!("{e:#}"));
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit_prompt(prompt);
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input.push(c);
                }
            }
            _ => {}
        }
    }

    pub(super) fn handle_key(&mut self, code: KeyCode) {
        if self.prompt.is_some() {
            self.handle_prompt_key(code);
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Char('1') => self.switch_view(View::Explore),
            KeyCode::Char('2') => self.switch_view(View::Boxplot),
            KeyCode::Char('3') => self.switch_view(View::LogTracks),
            KeyCode::Up | KeyCode::Left => self.move_cursor(false),
            KeyCode::Down | KeyCode::Right => self.move_cursor(true),
            KeyCode::Char('p') => self.cycle_policy(),
            KeyCode::Char('a') if self.view == View::Explore => {
                self.requested = vec![ALL_COLUMNS.to_owned()];
                self.refresh();
            }
            KeyCode::Char('s') if self.view == View::Explore => self.cycle_strategy(),
            KeyCode::Char('f') if self.view == View::Explore => {
                self.prompt = Some(Prompt::new(PromptTarget::FillValue(self.picker_column())));
            }
            KeyCode::Char(' ') => match self.view {
                View::Explore => self.toggle_requested(),
                View::LogTracks => self.toggle_track(),
                View::Boxplot => {}
            },
            KeyCode::Char('l') => self.toggle_log(),
            KeyCode::Char('y') if self.view == View::LogTracks => {
                self.depth_column = self.resolved_column_at_cursor();
            }
            KeyCode::Char('x') if self.view == View::LogTracks => {
                self.prompt = self
                    .resolved_column_at_cursor()
                    .map(|column| Prompt::new(PromptTarget::TrackRange(column)));
            }
            KeyCode::Char('r') if self.view == View::LogTracks => {
                self.prompt = self
                    .current_depth_column()
                    .map(|column| Prompt::new(PromptTarget::DepthRange(column.to_owned())));
            }
            KeyCode::Char('c') if self.view == View::LogTracks => self.clear_ranges(),
            _ => {}
        }
    }
}

fn toggle(list: &mut Vec<String>, name: String) {
    if let Some(pos) = list.iter().position(|n| *n == name) {
        list.remove(pos);
    } else {
        list.push(name);
    }
}

impl InputProvider for ExplorerApp {
    fn requested_columns(&self) -> &[String] {
        &self.requested
    }

    fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    fn boxplot_log_columns(&self) -> &[String] {
        &self.boxplot_log
    }

    fn track_columns(&self) -> Option<&[String]> {
        self.track_columns.as_deref()
    }

    fn depth_column(&self) -> Option<&str> {
        self.depth_column.as_deref()
    }

    fn track_log_columns(&self) -> &[String] {
        &self.track_log
    }

    fn track_ranges(&self) -> BTreeMap<String, AxisRange> {
        self.track_ranges.clone()
    }

    fn depth_range(&self) -> Option<AxisRange> {
        self.current_depth_column()
            .and_then(|column| self.depth_ranges.get(column))
            .copied()
    }
}

impl App for ExplorerApp {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        view::draw(self, frame);
    }
}

#[cfg(test)]
mod tests {
    use lasview_data::table::Column;
    use lasview_plot::log_track;

    use crate::session::{self, LogPlotInputs, ValueRange};

    use super::*;

    fn table() -> Table {
        Table::new(vec![
            Column::new("DEPTH", [Some(1.0), Some(2.0), Some(3.0)]),
            Column::new("GR", [Some(10.0), None, Some(30.0)]),
            Column::new("RHOB", [None, None, None]),
        ])
        .unwrap()
    }

    fn app() -> ExplorerApp {
        let inputs = SessionInputs {
            columns: vec!["DEPTH".to_owned(), "GR".to_owned()],
            ..SessionInputs::default()
        };
        ExplorerApp::new("test.las".to_owned(), table(), &inputs)
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.view, View::Explore);
        assert_eq!(app.selection.names(), &["DEPTH".to_owned(), "GR".to_owned()]);
        assert_eq!(app.resolved().unwrap().column("GR").unwrap().values(), &[10.0, 20.0, 30.0]);
        assert_eq!(app.current_depth_column(), Some("DEPTH"));
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_view_switching_and_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.view, View::Boxplot);
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.view, View::LogTracks);
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.view, View::Explore);
        assert!(!app.should_exit());
        app.handle_key(KeyCode::Esc);
        assert!(app.should_exit());
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = app();
        // "All columns", DEPTH, GR, RHOB
        app.handle_key(KeyCode::Up);
        assert_eq!(app.cursor, 3);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_all_missing_column_surfaces_notice() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        assert!(app.notice.as_deref().unwrap().contains("RHOB"));
        assert!(app.resolved().is_none());

        // Deleting rows empties the table instead of failing.
        while *app.policy() != ResolutionPolicy::DeleteRows {
            app.handle_key(KeyCode::Char('p'));
        }
        assert!(app.notice.is_none());
        assert_eq!(app.resolved().unwrap().row_count(), 0);
    }

    #[test]
    fn test_space_toggles_requested_column() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.selection.names(), &["GR".to_owned()]);
        assert!(!app.is_requested("DEPTH"));
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.selection.names(), &["GR".to_owned(), "DEPTH".to_owned()]);
    }

    #[test]
    fn test_log_flags_are_per_view() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.boxplot_log, vec!["GR".to_owned()]);
        assert!(app.track_log.is_empty());

        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.track_log, vec!["DEPTH".to_owned()]);
        assert_eq!(app.boxplot_log, vec!["GR".to_owned()]);
    }

    #[test]
    fn test_track_and_depth_selection() {
        let mut app = app();
        app.handle_key(KeyCode::Char('3'));
        assert!(app.track_columns().is_none());

        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char(' '));
        // Defaults were [GR]; toggling GR removes it.
        assert_eq!(app.track_columns(), Some(&[][..]));

        app.handle_key(KeyCode::Char('y'));
        assert_eq!(app.current_depth_column(), Some("GR"));
    }

    #[test]
    fn test_deselected_columns_drop_view_settings() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.boxplot_log, vec!["GR".to_owned()]);

        app.handle_key(KeyCode::Char('1'));
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.selection.names(), &["DEPTH".to_owned()]);
        assert!(app.boxplot_log.is_empty());
    }

    #[test]
    fn test_custom_session_policy_then_presets() {
        let inputs = SessionInputs {
            policy: ResolutionPolicy::Impute(Imputation::Global(FillStrategy::FixedValue(-1.0))),
            ..SessionInputs::default()
        };
        let mut app = ExplorerApp::new("t".to_owned(), table(), &inputs);
        assert_eq!(app.policy(), &inputs.policy);
        assert_eq!(app.resolved().unwrap().column("RHOB").unwrap().values(), &[-1.0; 3]);
        app.handle_key(KeyCode::Char('p'));
        assert_eq!(
            app.policy(),
            &ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Mean))
        );
    }

    fn press(app: &mut ExplorerApp, keys: &str) {
        for c in keys.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_strategy_cycles_per_column() {
        let mut app = app();
        // "All columns", DEPTH, GR, RHOB
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        press(&mut app, "ss");
        assert_eq!(app.strategy_for("GR"), Some(FillStrategy::Zero));
        assert_eq!(app.strategy_for("DEPTH"), Some(FillStrategy::Mean));
        assert_eq!(app.strategy_for(ALL_COLUMNS), None);
        assert_eq!(app.resolved().unwrap().column("GR").unwrap().values(), &[10.0, 0.0, 30.0]);

        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Up);
        press(&mut app, "s");
        assert_eq!(
            app.policy(),
            &ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Mean))
        );
        press(&mut app, "s");
        assert_eq!(app.strategy_for("GR"), Some(FillStrategy::Median));
    }

    #[test]
    fn test_fixed_value_entry() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        press(&mut app, "f-42");
        app.handle_key(KeyCode::Backspace);
        press(&mut app, "1");
        assert_eq!(app.prompt.as_ref().unwrap().input, "-41");
        app.handle_key(KeyCode::Enter);
        assert!(app.prompt.is_none());
        assert_eq!(app.strategy_for("GR"), Some(FillStrategy::FixedValue(-41.0)));
        assert_eq!(app.resolved().unwrap().column("GR").unwrap().values(), &[10.0, -41.0, 30.0]);

        // Keys go to the entry, so `q` does not quit.
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Up);
        press(&mut app, "fq");
        app.handle_key(KeyCode::Enter);
        assert!(!app.should_exit());
        assert!(app.notice.as_deref().unwrap().contains("Invalid number"));
        assert_eq!(app.strategy_for("GR"), Some(FillStrategy::FixedValue(-41.0)));

        press(&mut app, "f5");
        app.handle_key(KeyCode::Esc);
        assert!(app.prompt.is_none());
        assert!(!app.should_exit());
        press(&mut app, "f5");
        app.handle_key(KeyCode::Enter);
        assert_eq!(
            app.policy(),
            &ResolutionPolicy::Impute(Imputation::Global(FillStrategy::FixedValue(5.0)))
        );
    }

    #[test]
    fn test_track_range_entry_and_clear() {
        let mut app = app();
        press(&mut app, "3");
        app.handle_key(KeyCode::Right);
        press(&mut app, "x0, 150");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.track_ranges()["GR"], AxisRange::new(0.0, 150.0));
        let figure = log_track::render_log_tracks(&session::plot_spec(
            app.resolved().unwrap(),
            &app,
        ))
        .unwrap();
        assert_eq!(figure.tracks[0].x_axis.range, AxisRange::new(0.0, 150.0));

        press(&mut app, "x150,0");
        app.handle_key(KeyCode::Enter);
        assert!(app.notice.as_deref().unwrap().contains("below"));
        assert_eq!(app.track_ranges()["GR"], AxisRange::new(0.0, 150.0));

        press(&mut app, "c");
        assert!(app.track_ranges().is_empty());
    }

    #[test]
    fn test_depth_range_entry() {
        let mut app = app();
        press(&mut app, "3r1.5,2.5");
        assert_eq!(app.prompt.as_ref().unwrap().label(), "Depth range for DEPTH (min,max)");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.depth_range(), Some(AxisRange::new(2.5, 1.5)));
        assert!(app.has_range_override("DEPTH"));

        press(&mut app, "c");
        assert!(app.depth_range().is_none());
    }

    #[test]
    fn test_depth_range_follows_depth_column() {
        let inputs = SessionInputs {
            columns: vec!["DEPTH".to_owned(), "GR".to_owned()],
            log_plot: LogPlotInputs {
                y_column: Some("DEPTH".to_owned()),
                y_range: Some(ValueRange {
                    min: 1500.0,
                    max: 1600.0,
                }),
                ..LogPlotInputs::default()
            },
            ..SessionInputs::default()
        };
        let mut app = ExplorerApp::new("t".to_owned(), table(), &inputs);
        assert_eq!(app.depth_range(), Some(AxisRange::new(1600.0, 1500.0)));

        press(&mut app, "3");
        app.handle_key(KeyCode::Right);
        press(&mut app, "y");
        assert_eq!(app.current_depth_column(), Some("GR"));
        assert!(app.depth_range().is_none());

        let figure = log_track::render_log_tracks(&session::plot_spec(
            app.resolved().unwrap(),
            &app,
        ))
        .unwrap();
        assert_eq!(figure.y_axis.range, AxisRange::new(30.0, 10.0));
        let points = &figure.tracks[0].points;
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|&(_, depth)| {
            figure
                .y_axis
                .fraction(depth)
                .is_some_and(|f| (0.0..=1.0).contains(&f))
        }));

        // Switching back restores the range set for DEPTH.
        app.handle_key(KeyCode::Left);
        press(&mut app, "y");
        assert_eq!(app.depth_range(), Some(AxisRange::new(1600.0, 1500.0)));
    }
}
