#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use fltk::{app, prelude::*};
use tracing_subscriber::EnvFilter;

use code_pad::app::host::{Flow, MenuState};
use code_pad::app::ipc::bus;
use code_pad::app::runtime::settle;
use code_pad::app::store::EditorOptions;
use code_pad::app::surface::{EditorFactory, EditorWidget};
use code_pad::app::{
    AppSettings, EditingSurface, HostContext, MenuCommand, Platform, RunMode, SurfaceEvent,
    ThemeMode, WindowController, detect_system_dark_mode,
};
use code_pad::ui::editor_container::FltkEditor;
use code_pad::ui::file_dialogs::FltkDialogs;
use code_pad::ui::main_window::{FltkShell, build_main_window};
use code_pad::ui::theme::apply_chrome_theme;

fn init_tracing(run_mode: RunMode) {
    let directive = if run_mode.is_debug() { "code_pad=debug" } else { "code_pad=info" };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive.parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    let run_mode = RunMode::from_env();
    init_tracing(run_mode);
    tracing::info!("CodePad v{} starting ({:?})", env!("CARGO_PKG_VERSION"), run_mode);

    let mut settings = AppSettings::load();
    let is_dark = match settings.theme_mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::SystemDefault => detect_system_dark_mode(),
    };

    let app = app::App::default();
    let (menu_tx, menu_rx) = app::channel::<MenuCommand>();
    let (event_tx, event_rx) = app::channel::<SurfaceEvent>();

    let mut widgets = build_main_window(&menu_tx);
    apply_chrome_theme(&mut widgets.wind, &mut widgets.menu, &mut widgets.status_bar.frame, is_dark);

    let (host_endpoint, ui_endpoint) = bus();

    let ctx = HostContext::new(
        Box::new(FltkShell::new(&widgets.wind, &widgets.menu, menu_tx)),
        Box::new(FltkDialogs),
        host_endpoint,
        MenuState::new(settings.codemap_enabled),
        run_mode,
        Platform::current(),
    );
    let mut controller = WindowController::new(ctx);

    let editor_row = widgets.editor_row.clone();
    let factory: EditorFactory = Box::new(move |options: &EditorOptions| {
        Box::new(FltkEditor::new(&editor_row, options, event_tx)) as Box<dyn EditorWidget>
    });
    let mut surface = EditingSurface::new(ui_endpoint, settings.editor_options(is_dark), factory);
    surface.start();

    widgets.wind.show();

    #[cfg(target_os = "windows")]
    code_pad::ui::theme::set_windows_titlebar_theme(&widgets.wind, is_dark);

    if let Err(e) = settle(&mut controller, &mut surface) {
        tracing::error!("message bus failed during startup: {e}");
    }
    widgets.status_bar.update(surface.status());

    while app.wait() {
        let mut exit = false;

        while let Some(command) = menu_rx.recv() {
            if controller.handle_command(command) == Flow::Exit {
                exit = true;
                break;
            }
        }

        let mut buffer_changed = false;
        while let Some(event) = event_rx.recv() {
            match event {
                SurfaceEvent::SaveCopyAs => surface.save_copy_as(),
                SurfaceEvent::BufferChanged => buffer_changed = true,
            }
        }
        if buffer_changed {
            surface.refresh_stats();
        }

        if let Err(e) = settle(&mut controller, &mut surface) {
            tracing::error!("message bus failed: {e}");
            exit = true;
        }
        widgets.status_bar.update(surface.status());

        if exit || !controller.is_open() {
            break;
        }
    }

    if let Some(state) = controller.teardown() {
        settings.codemap_enabled = state.codemap_visible;
        if let Err(e) = settings.save() {
            tracing::warn!("could not save settings: {e}");
        }
    }
    surface.destroy_editor();
    tracing::info!("CodePad exiting");
}
