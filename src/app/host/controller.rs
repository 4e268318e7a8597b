use crate::app::ipc::{Channel, ControlSignal, IpcError, ListenerRegistry, Payload, Side};
use crate::app::messages::MenuCommand;

use super::context::HostContext;
use super::file_bridge::{self, BridgeOutcome};
use super::menu_state::MenuState;

/// Whether the dispatch loop should keep running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Owns the host context for the lifetime of the window and turns menu
/// commands into dialogs, window changes or messages to the surface.
pub struct WindowController {
    ctx: Option<HostContext>,
    listeners: ListenerRegistry<HostContext>,
}

impl WindowController {
    pub fn new(mut ctx: HostContext) -> Self {
        let mut listeners = ListenerRegistry::new(Side::Host);
        file_bridge::register_listeners(&mut listeners);
        ctx.rebuild_menu();
        Self {
            ctx: Some(ctx),
            listeners,
        }
    }

    pub fn is_open(&self) -> bool {
        self.ctx.is_some()
    }

    pub fn menu_state(&self) -> Option<MenuState> {
        self.ctx.as_ref().map(|ctx| ctx.menu_state)
    }

    pub fn handle_command(&mut self, command: MenuCommand) -> Flow {
        let Some(ctx) = self.ctx.as_mut() else {
            return Flow::Exit;
        };
        tracing::debug!(?command, "menu command");

        let sent = match command {
            MenuCommand::FileOpen => {
                if let BridgeOutcome::Failed(reason) = file_bridge::request_open(ctx) {
                    tracing::warn!("open failed: {reason}");
                }
                Ok(())
            }
            MenuCommand::FileNew => {
                tracing::info!("new document requested; only one buffer is supported");
                Ok(())
            }
            MenuCommand::FileSave => ctx.endpoint.send(Channel::FetchCodeToSave, Payload::Empty),
            MenuCommand::FileSaveAs => ctx.endpoint.send(Channel::FetchCodeToSaveAs, Payload::Empty),
            MenuCommand::FileClose | MenuCommand::WindowClose => {
                ctx.shell.close();
                return Flow::Exit;
            }
            MenuCommand::Edit(action) => ctx.endpoint.send(Channel::EditAction, Payload::Edit(action)),
            MenuCommand::ToggleCodemap => {
                let visible = ctx.menu_state.toggle_codemap();
                ctx.rebuild_menu();
                ctx.endpoint.send(Channel::SetCodemap, Payload::Flag(visible))
            }
            MenuCommand::ToggleFullScreen => {
                let fullscreen = !ctx.shell.is_fullscreen();
                ctx.shell.set_fullscreen(fullscreen);
                Ok(())
            }
            MenuCommand::Reload => ctx.endpoint.signal(ControlSignal::Reload),
            MenuCommand::InspectState => {
                tracing::info!(menu_state = ?ctx.menu_state, run_mode = ?ctx.run_mode, "host state");
                ctx.endpoint.signal(ControlSignal::Inspect)
            }
            MenuCommand::ShowAbout => {
                ctx.shell.show_about();
                Ok(())
            }
        };

        if let Err(e) = sent {
            tracing::error!(?command, "could not reach the editing surface: {e}");
        }
        Flow::Continue
    }

    /// Deliver everything the surface has sent. Returns how many messages ran.
    pub fn pump(&mut self) -> Result<usize, IpcError> {
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(0);
        };
        let mut handled = 0;
        while let Some(envelope) = ctx.endpoint.try_recv()? {
            handled += 1;
            if self.listeners.emit(envelope.route, &envelope.payload, ctx) == 0 {
                tracing::debug!(route = %envelope.route, "no host listener");
            }
        }
        Ok(handled)
    }

    /// Release the context on window close and hand back the final menu state.
    pub fn teardown(&mut self) -> Option<MenuState> {
        self.listeners.clear();
        let ctx = self.ctx.take()?;
        tracing::info!("window controller torn down");
        Some(ctx.menu_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::host::testing::{context, Recorder};
    use crate::app::ipc::{EditAction, Frame, Route, UiEndpoint};

    fn drain(ui: &UiEndpoint) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some(frame) = ui.try_recv().unwrap() {
            frames.push(frame);
        }
        frames
    }

    fn routes(frames: &[Frame]) -> Vec<Route> {
        frames
            .iter()
            .filter_map(|f| match f {
                Frame::Message { envelope } => Some(envelope.route),
                Frame::Control { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_new_installs_menu() {
        let rec = Recorder::default();
        let (ctx, _ui) = context(&rec);
        let _controller = WindowController::new(ctx);
        assert_eq!(rec.menus_installed(), 1);
    }

    #[test]
    fn test_codemap_toggle_rebuilds_menu_and_notifies() {
        let rec = Recorder::default();
        let (ctx, ui) = context(&rec);
        let mut controller = WindowController::new(ctx);

        controller.handle_command(MenuCommand::ToggleCodemap);
        controller.handle_command(MenuCommand::ToggleCodemap);

        assert_eq!(controller.menu_state(), Some(MenuState::default()));
        assert_eq!(rec.menus_installed(), 3);
        let flags: Vec<_> = drain(&ui)
            .into_iter()
            .filter_map(|f| match f {
                Frame::Message { envelope } => Some(envelope.payload),
                _ => None,
            })
            .collect();
        assert_eq!(flags, vec![Payload::Flag(false), Payload::Flag(true)]);
    }

    #[test]
    fn test_save_commands_fetch_code() {
        let rec = Recorder::default();
        let (ctx, ui) = context(&rec);
        let mut controller = WindowController::new(ctx);

        controller.handle_command(MenuCommand::FileSave);
        controller.handle_command(MenuCommand::FileSaveAs);
        controller.handle_command(MenuCommand::Edit(EditAction::Copy));
        assert_eq!(
            routes(&drain(&ui)),
            vec![
                Route::request(Channel::FetchCodeToSave),
                Route::request(Channel::FetchCodeToSaveAs),
                Route::request(Channel::EditAction),
            ]
        );
    }

    #[test]
    fn test_new_is_a_no_op() {
        let rec = Recorder::default();
        let (ctx, ui) = context(&rec);
        let mut controller = WindowController::new(ctx);
        assert_eq!(controller.handle_command(MenuCommand::FileNew), Flow::Continue);
        assert!(drain(&ui).is_empty());
    }

    #[test]
    fn test_fullscreen_and_dev_commands() {
        let rec = Recorder::default();
        let (ctx, ui) = context(&rec);
        let mut controller = WindowController::new(ctx);

        controller.handle_command(MenuCommand::ToggleFullScreen);
        assert!(rec.is_fullscreen());
        controller.handle_command(MenuCommand::ToggleFullScreen);
        assert!(!rec.is_fullscreen());

        controller.handle_command(MenuCommand::Reload);
        controller.handle_command(MenuCommand::InspectState);
        assert_eq!(
            drain(&ui),
            vec![
                Frame::Control { signal: ControlSignal::Reload },
                Frame::Control { signal: ControlSignal::Inspect },
            ]
        );
    }

    #[test]
    fn test_ping_gets_pong() {
        let rec = Recorder::default();
        let (ctx, ui) = context(&rec);
        let mut controller = WindowController::new(ctx);

        ui.send(Channel::Ping, Payload::Text("ping".into())).unwrap();
        assert_eq!(controller.pump().unwrap(), 1);
        match ui.try_recv().unwrap() {
            Some(Frame::Message { envelope }) => {
                assert_eq!(envelope.route, Route::reply(Channel::Ping));
                assert_eq!(envelope.payload, Payload::Text("pong".into()));
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_close_tears_down() {
        let rec = Recorder::default();
        let (ctx, _ui) = context(&rec);
        let mut controller = WindowController::new(ctx);

        controller.handle_command(MenuCommand::ToggleCodemap);
        assert_eq!(controller.handle_command(MenuCommand::WindowClose), Flow::Exit);
        assert!(rec.is_closed());

        let state = controller.teardown().unwrap();
        assert!(!state.codemap_visible);
        assert!(!controller.is_open());
        assert!(controller.teardown().is_none());
        assert_eq!(controller.handle_command(MenuCommand::FileSave), Flow::Exit);
        assert_eq!(controller.pump().unwrap(), 0);
    }

    #[test]
    fn test_about() {
        let rec = Recorder::default();
        let (ctx, _ui) = context(&rec);
        let mut controller = WindowController::new(ctx);
        controller.handle_command(MenuCommand::ShowAbout);
        assert!(rec.about_shown());
    }
}
