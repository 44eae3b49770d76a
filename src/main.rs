use folder_preview::app;
use folder_preview::app::events::UserEvent;
use folder_preview::app::file_dialog::NativeDialogService;
use std::sync::{Arc, Mutex};
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use tracing_subscriber::EnvFilter;
use wry::WebViewBuilder;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

    let state = app::state::AppState::default();
    let (width, height) = state.config.window_size;
    let (pos_x, pos_y) = state.config.window_position;
    let (min_width, min_height) = state.config.min_window_size;

    let window = WindowBuilder::new()
        .with_title("Folder Preview")
        .with_inner_size(tao::dpi::LogicalSize::new(width, height))
        .with_position(tao::dpi::LogicalPosition::new(pos_x, pos_y))
        .with_min_inner_size(tao::dpi::LogicalSize::new(min_width, min_height))
        .build(&event_loop)
        .expect("Failed to build Window");

    let proxy = event_loop.create_proxy();
    let state = Arc::new(Mutex::new(state));
    let dialog_service = Arc::new(NativeDialogService);

    let ipc_handler_state = state.clone();
    let ipc_handler_proxy = proxy.clone();
    let ipc_handler = move |message: String| {
        app::handle_ipc_message(
            message,
            dialog_service.clone(),
            ipc_handler_proxy.clone(),
            ipc_handler_state.clone(),
        );
    };

    let drop_handler_state = state.clone();
    let drop_handler_proxy = proxy.clone();
    let file_drop_handler = move |event| {
        use wry::FileDropEvent;
        match event {
            FileDropEvent::Hovered { .. } => {
                let _ = drop_handler_proxy.send_event(UserEvent::DragStateChanged(true));
            }
            FileDropEvent::Dropped { paths, .. } => {
                let _ = drop_handler_proxy.send_event(UserEvent::DragStateChanged(false));
                if let Some(path) = paths.first() {
                    tracing::info!("Folder dropped: {:?}", path);
                    app::tasks::start_build_on_path(
                        path.clone(),
                        drop_handler_proxy.clone(),
                        drop_handler_state.clone(),
                    );
                }
            }
            FileDropEvent::Cancelled => {
                let _ = drop_handler_proxy.send_event(UserEvent::DragStateChanged(false));
            }
            _ => (),
        }
        true
    };

    let webview = WebViewBuilder::new(&window)
        .with_html(include_str!("ui/index.html"))
        .with_devtools(cfg!(debug_assertions))
        .with_ipc_handler(ipc_handler)
        .with_file_drop_handler(file_drop_handler)
        .build()
        .expect("Failed to build WebView");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                tracing::info!("Application initialized.");
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                tracing::info!("Close requested.");
                state
                    .lock()
                    .expect("Mutex was poisoned. This should not happen.")
                    .cancel_current_build();
                *control_flow = ControlFlow::Exit;
            }
            Event::UserEvent(user_event) => {
                app::handle_user_event(user_event, &webview);
            }
            _ => (),
        }
    });
}
