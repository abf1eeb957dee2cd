//! careview - address map and nurse card in the terminal

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;

use careview::action::Action;
use careview::api::Geocoder;
use careview::components::{
    AddressEditor, AddressEditorProps, Component, Dashboard, DashboardProps,
};
use careview::config::Settings;
use careview::effect::{self, Effect};
use careview::reducer::reducer;
use careview::state::AppState;
use careview::telemetry;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Show an address on a map next to a compact nurse card
#[derive(Parser, Debug)]
#[command(name = "careview")]
#[command(about = "Address map and nurse card for patient management")]
struct Args {
    #[command(flatten)]
    settings: Settings,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CareComponentId {
    Dashboard,
    Editor,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CareContext {
    Main,
    Editor,
}

impl EventRoutingState<CareComponentId, CareContext> for AppState {
    fn focused(&self) -> Option<CareComponentId> {
        if self.editor_open {
            Some(CareComponentId::Editor)
        } else {
            Some(CareComponentId::Dashboard)
        }
    }

    fn modal(&self) -> Option<CareComponentId> {
        if self.editor_open {
            Some(CareComponentId::Editor)
        } else {
            None
        }
    }

    fn binding_context(&self, id: CareComponentId) -> CareContext {
        match id {
            CareComponentId::Dashboard => CareContext::Main,
            CareComponentId::Editor => CareContext::Editor,
        }
    }

    fn default_context(&self) -> CareContext {
        CareContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        settings,
        debug: debug_args,
    } = Args::parse();

    telemetry::init(settings.log_file.as_deref())?;

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let geocoder: Arc<dyn Geocoder> = Arc::new(
        settings
            .geocoder()
            .map_err(|e| io::Error::other(e.to_string()))?,
    );

    let state = debug
        .load_state_or_else_async(|| {
            let settings = settings.clone();
            async move {
                let nurse = settings.load_nurse().await?;
                Ok::<AppState, io::Error>(settings.initial_state(nurse))
            }
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, geocoder).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct CareUi {
    dashboard: Dashboard,
    editor: AddressEditor,
}

impl CareUi {
    fn new() -> Self {
        Self {
            dashboard: Dashboard::default(),
            editor: AddressEditor::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<CareComponentId>,
    ) {
        event_ctx.set_component_area(CareComponentId::Dashboard, area);

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused() && !state.editor_open,
        };
        self.dashboard.render(frame, area, props);

        self.editor.set_open(state.editor_open);
        if state.editor_open {
            let modal_area = centered_rect(70, 7, area);
            event_ctx.set_component_area(CareComponentId::Editor, modal_area);
            let props = AddressEditorProps {
                query: &state.editor_query,
                is_focused: render_ctx.is_focused(),
            };
            self.editor.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&CareComponentId::Editor);
        }
    }

    fn handle_dashboard_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_editor_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.editor.set_open(state.editor_open);
        let props = AddressEditorProps {
            query: &state.editor_query,
            is_focused: true,
        };
        let actions: Vec<_> = self.editor.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    geocoder: Arc<dyn Geocoder>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CareUi::new()));
    let mut bus: EventBus<AppState, Action, CareComponentId, CareContext> = EventBus::new();
    let keybindings: Keybindings<CareContext> = Keybindings::new();

    let ui_dashboard = Rc::clone(&ui);
    bus.register(CareComponentId::Dashboard, move |event, state| {
        ui_dashboard
            .borrow_mut()
            .handle_dashboard_event(&event.kind, state)
    });

    let ui_editor = Rc::clone(&ui);
    bus.register(CareComponentId::Editor, move |event, state| {
        ui_editor
            .borrow_mut()
            .handle_editor_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    // The terminal is attached by now; mounting the map starts the first lookup.
    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::MapMounted),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&geocoder)),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, geocoder: Arc<dyn Geocoder>) {
    match effect {
        Effect::Geocode { seq, query } => {
            ctx.tasks().spawn(TaskKey::new("geocode"), async move {
                effect::geocode(geocoder.as_ref(), seq, query).await
            });
        }
    }
}
