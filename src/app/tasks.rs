//! Background tasks: building the tree of an opened folder and loading previews.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::helpers::notify_state;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::loaded_status_message;

use crate::core::{
    load_preview, BuildTicket, CoreError, DirectoryHandle, LocalDirectory, TreeBuilder, TreeNode,
};

/// Opens `path` as a local folder and builds its tree.
///
/// Sends a `ShowError` event if `path` is not a readable directory.
pub fn start_build_on_path<P: EventProxy>(path: PathBuf, proxy: P, state: Arc<Mutex<AppState>>) {
    let label = path.display().to_string();
    let open = async move {
        let directory = LocalDirectory::open(path).await?;
        tracing::info!("Opened folder {:?}", directory.path());
        Ok::<_, CoreError>(Arc::new(directory) as Arc<dyn DirectoryHandle>)
    };
    start_open(label, open, proxy, state);
}

/// Replaces the opened folder with the one `open` resolves to and builds its tree.
///
/// The build ticket is issued before `open` runs, so of two quick selections
/// the later one wins no matter which folder finishes opening first.
pub fn start_open<P, F>(label: String, open: F, proxy: P, state: Arc<Mutex<AppState>>)
where
    P: EventProxy,
    F: Future<Output = Result<Arc<dyn DirectoryHandle>, CoreError>> + Send + 'static,
{
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    let ticket = begin_build(&mut state_guard, &label);
    let handle = tokio::spawn(open_and_build(open, ticket, proxy.clone(), state.clone()));
    state_guard.build_task = Some(handle);

    proxy.send_event(UserEvent::ResetPreview);
    notify_state(&state_guard, &proxy);
}

/// Replaces the opened folder with `root` and builds its tree in the background.
///
/// Any build still running for a previous folder is cancelled and its result
/// will be discarded even if it finishes.
pub fn start_build<P: EventProxy>(
    root: Arc<dyn DirectoryHandle>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    let ticket = begin_build(&mut state_guard, root.name());
    state_guard.root_name = root.name().to_string();
    let handle = tokio::spawn(build_tree_task(root, ticket, proxy.clone(), state.clone()));
    state_guard.build_task = Some(handle);

    proxy.send_event(UserEvent::ResetPreview);
    notify_state(&state_guard, &proxy);
}

fn begin_build(state: &mut AppState, label: &str) -> BuildTicket {
    state.reset_folder_state();
    state.is_building = true;
    state.status_message = format!("Reading '{label}'...");

    let ticket = state.build_generation.begin();
    tracing::info!("Starting build {} for '{}'", ticket.id(), label);
    ticket
}

async fn open_and_build<P, F>(open: F, ticket: BuildTicket, proxy: P, state: Arc<Mutex<AppState>>)
where
    P: EventProxy,
    F: Future<Output = Result<Arc<dyn DirectoryHandle>, CoreError>>,
{
    let root = match open.await {
        Ok(root) => root,
        Err(e) => {
            let mut state_guard = state
                .lock()
                .expect("Mutex was poisoned. This should not happen.");
            if !ticket.is_current() {
                return;
            }
            tracing::warn!("Build {} could not open its folder: {}", ticket.id(), e);
            state_guard.is_building = false;
            state_guard.build_task = None;
            state_guard.status_message = e.to_string();
            proxy.send_event(UserEvent::ShowError(e.to_string()));
            notify_state(&state_guard, &proxy);
            return;
        }
    };

    {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        if !ticket.is_current() {
            tracing::info!("Discarding superseded open of '{}'", root.name());
            return;
        }
        state_guard.root_name = root.name().to_string();
    }

    build_tree_task(root, ticket, proxy, state).await;
}

async fn build_tree_task<P: EventProxy>(
    root: Arc<dyn DirectoryHandle>,
    ticket: BuildTicket,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let result = TreeBuilder::with_ticket(ticket.clone())
        .build(root.as_ref())
        .await;

    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    if !ticket.is_current() {
        tracing::info!("Discarding result of superseded build {}", ticket.id());
        return;
    }

    state_guard.is_building = false;
    state_guard.build_task = None;

    match result {
        Ok(tree) => {
            state_guard.status_message = loaded_status_message(root.name(), &tree);
            state_guard.tree = tree;
        }
        Err(e) => {
            tracing::error!("Build {} for '{}' failed: {}", ticket.id(), root.name(), e);
            state_guard.tree.clear();
            state_guard.status_message = format!("Could not read '{}': {}", root.name(), e);
            proxy.send_event(UserEvent::ShowError(state_guard.status_message.clone()));
        }
    }

    notify_state(&state_guard, &proxy);
}

/// Marks the file at `path` as previewed and loads its preview in the background.
///
/// Returns `false` if `path` does not name a file of the current tree. Only the
/// most recent request is delivered to the UI.
pub fn start_preview<P: EventProxy>(path: String, proxy: P, state: Arc<Mutex<AppState>>) -> bool {
    let (handle, name, ticket) = {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");

        let Some(node) = TreeNode::find(&state_guard.tree, &path) else {
            return false;
        };
        let Some(handle) = node.file_handle().cloned() else {
            return false;
        };
        let name = node.name().to_string();

        state_guard.previewed_file = Some(path.clone());
        let ticket = state_guard.preview_generation.begin();
        notify_state(&state_guard, &proxy);
        (handle, name, ticket)
    };

    tokio::spawn(async move {
        let preview = load_preview(handle.as_ref(), &name).await;

        // Checked under the lock so a newer request cannot slip in between.
        let _state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        if !ticket.is_current() {
            tracing::debug!("Dropping stale preview of '{}'", path);
            return;
        }
        proxy.send_event(UserEvent::ShowFilePreview {
            name,
            path,
            content: preview.display_text().to_string(),
            is_text: preview.is_text(),
        });
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::{Entry, MemoryDirectory, MemoryFile};
    use async_trait::async_trait;
    use std::io;
    use std::time::Duration;
    use tokio::sync::{mpsc, oneshot, Semaphore};

    #[derive(Clone)]
    struct TestEventProxy {
        sender: mpsc::UnboundedSender<UserEvent>,
    }

    impl EventProxy for TestEventProxy {
        fn send_event(&self, event: UserEvent) {
            self.sender.send(event).expect("Test receiver dropped");
        }
    }

    /// A directory whose listing waits until the test opens the gate.
    #[derive(Debug)]
    struct GatedDirectory {
        inner: MemoryDirectory,
        gate: Arc<Semaphore>,
    }

    #[async_trait]
    impl DirectoryHandle for GatedDirectory {
        fn name(&self) -> &str {
            self.inner.name()
        }

        async fn entries(&self) -> io::Result<Vec<Entry>> {
            let _permit = self.gate.acquire().await.expect("gate closed");
            self.inner.entries().await
        }
    }

    fn setup() -> (
        TestEventProxy,
        mpsc::UnboundedReceiver<UserEvent>,
        Arc<Mutex<AppState>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Arc::new(Mutex::new(AppState::new(AppConfig::default())));
        (TestEventProxy { sender: tx }, rx, state)
    }

    async fn wait_for_idle(rx: &mut mpsc::UnboundedReceiver<UserEvent>) -> Vec<UserEvent> {
        let mut seen = Vec::new();
        loop {
            let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("timed out waiting for build")
                .expect("channel closed");
            let done = matches!(&event, UserEvent::StateUpdate(ui) if !ui.is_building);
            seen.push(event);
            if done {
                return seen;
            }
        }
    }

    #[tokio::test]
    async fn test_build_commits_sorted_tree() {
        let (proxy, mut rx, state) = setup();
        let root = MemoryDirectory::new("project")
            .with_file("b.txt", "")
            .with_dir(MemoryDirectory::new("A"))
            .with_file("a.txt", "");

        start_build(Arc::new(root), proxy, state.clone());
        let events = wait_for_idle(&mut rx).await;

        assert!(events.contains(&UserEvent::ResetPreview));
        let state = state.lock().unwrap();
        let names: Vec<_> = state.tree.iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["A", "a.txt", "b.txt"]);
        assert_eq!(state.root_name, "project");
        assert!(state.build_task.is_none());
        assert_eq!(state.status_message, "Loaded 'project': 1 folder, 2 files.");
    }

    #[tokio::test]
    async fn test_failed_build_reports_error_and_keeps_tree_empty() {
        let (proxy, mut rx, state) = setup();
        let root = MemoryDirectory::new("project")
            .with_file("a.txt", "")
            .with_dir(MemoryDirectory::new("secret").failing());

        start_build(Arc::new(root), proxy, state.clone());
        let events = wait_for_idle(&mut rx).await;

        assert!(events
            .iter()
            .any(|e| matches!(e, UserEvent::ShowError(msg) if msg.contains("secret"))));
        let state = state.lock().unwrap();
        assert!(state.tree.is_empty());
        assert!(!state.is_building);
    }

    #[tokio::test]
    async fn test_superseded_build_is_discarded() {
        let (proxy, mut rx, state) = setup();
        let gate = Arc::new(Semaphore::new(0));
        let slow = GatedDirectory {
            inner: MemoryDirectory::new("old").with_file("old.txt", ""),
            gate: gate.clone(),
        };

        start_build(Arc::new(slow), proxy.clone(), state.clone());
        assert!(state.lock().unwrap().build_task.is_some());

        let fresh = MemoryDirectory::new("new").with_file("new.txt", "");
        start_build(Arc::new(fresh), proxy, state.clone());
        gate.add_permits(1);

        // Drain until the newer build finished.
        loop {
            let events = wait_for_idle(&mut rx).await;
            if events
                .iter()
                .any(|e| matches!(e, UserEvent::StateUpdate(ui) if ui.root_name == "new" && ui.has_tree))
            {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = state.lock().unwrap();
        assert_eq!(state.root_name, "new");
        assert_eq!(state.tree.len(), 1);
        assert_eq!(state.tree[0].name(), "new.txt");
    }

    #[tokio::test]
    async fn test_stale_ticket_result_is_not_committed() {
        let (proxy, mut rx, state) = setup();
        let generation = state.lock().unwrap().build_generation.clone();
        let stale = generation.begin();
        generation.begin();

        let root = MemoryDirectory::new("late").with_file("late.txt", "");
        build_tree_task(Arc::new(root), stale, proxy, state.clone()).await;

        assert!(state.lock().unwrap().tree.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_start_build_on_missing_path_sends_error() {
        let (proxy, mut rx, state) = setup();
        let missing = tempfile::tempdir().unwrap().path().join("nope");

        start_build_on_path(missing, proxy, state.clone());
        let events = wait_for_idle(&mut rx).await;

        assert!(events
            .iter()
            .any(|e| matches!(e, UserEvent::ShowError(msg) if msg.contains("not a valid directory"))));
        let state = state.lock().unwrap();
        assert!(state.root_name.is_empty());
        assert!(state.tree.is_empty());
        assert!(!state.is_building);
    }

    #[tokio::test]
    async fn test_later_selection_wins_when_it_opens_first() {
        let (proxy, mut rx, state) = setup();
        let (release_first, first_opened) = oneshot::channel::<()>();
        let (release_second, second_opened) = oneshot::channel::<()>();

        start_open(
            "first".to_string(),
            async move {
                let _ = first_opened.await;
                let root = MemoryDirectory::new("first").with_file("first.txt", "");
                Ok::<_, CoreError>(Arc::new(root) as Arc<dyn DirectoryHandle>)
            },
            proxy.clone(),
            state.clone(),
        );
        start_open(
            "second".to_string(),
            async move {
                let _ = second_opened.await;
                let root = MemoryDirectory::new("second").with_file("second.txt", "");
                Ok::<_, CoreError>(Arc::new(root) as Arc<dyn DirectoryHandle>)
            },
            proxy,
            state.clone(),
        );

        let _ = release_second.send(());
        loop {
            let events = wait_for_idle(&mut rx).await;
            if events
                .iter()
                .any(|e| matches!(e, UserEvent::StateUpdate(ui) if ui.has_tree))
            {
                break;
            }
        }
        let _ = release_first.send(());
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = state.lock().unwrap();
        assert_eq!(state.root_name, "second");
        assert_eq!(state.tree[0].name(), "second.txt");
        assert!(!state.is_building);
    }

    #[tokio::test]
    async fn test_stale_open_does_not_touch_state() {
        let (proxy, mut rx, state) = setup();
        let generation = state.lock().unwrap().build_generation.clone();
        let stale = generation.begin();
        generation.begin();

        let open = async {
            let root = MemoryDirectory::new("late").with_file("late.txt", "");
            Ok::<_, CoreError>(Arc::new(root) as Arc<dyn DirectoryHandle>)
        };
        open_and_build(open, stale.clone(), proxy.clone(), state.clone()).await;

        let failed = async {
            Err::<Arc<dyn DirectoryHandle>, _>(CoreError::NotADirectory(PathBuf::from("late")))
        };
        open_and_build(failed, stale, proxy, state.clone()).await;

        let state = state.lock().unwrap();
        assert!(state.root_name.is_empty());
        assert!(state.tree.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_preview_sends_content_for_tree_file() {
        let (proxy, mut rx, state) = setup();
        let root = MemoryDirectory::new("project")
            .with_dir(MemoryDirectory::new("docs").with_file("notes.md", "# Notes"));
        start_build(Arc::new(root), proxy.clone(), state.clone());
        wait_for_idle(&mut rx).await;

        assert!(start_preview("docs/notes.md".to_string(), proxy, state.clone()));

        let mut preview = None;
        while preview.is_none() {
            match tokio::time::timeout(Duration::from_secs(2), rx.recv()).await {
                Ok(Some(event @ UserEvent::ShowFilePreview { .. })) => preview = Some(event),
                Ok(Some(_)) => {}
                _ => panic!("no preview received"),
            }
        }
        assert_eq!(
            preview.unwrap(),
            UserEvent::ShowFilePreview {
                name: "notes.md".to_string(),
                path: "docs/notes.md".to_string(),
                content: "# Notes".to_string(),
                is_text: true,
            }
        );
        assert_eq!(
            state.lock().unwrap().previewed_file.as_deref(),
            Some("docs/notes.md")
        );
    }

    #[tokio::test]
    async fn test_preview_rejects_folders_and_unknown_paths() {
        let (proxy, mut rx, state) = setup();
        let root = MemoryDirectory::new("project").with_dir(MemoryDirectory::new("docs"));
        start_build(Arc::new(root), proxy.clone(), state.clone());
        wait_for_idle(&mut rx).await;

        assert!(!start_preview("docs".to_string(), proxy.clone(), state.clone()));
        assert!(!start_preview("missing.txt".to_string(), proxy, state.clone()));
        assert!(state.lock().unwrap().previewed_file.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_preview_sends_sentinel() {
        let (proxy, mut rx, state) = setup();
        let root =
            MemoryDirectory::new("project").with_file_handle("broken.txt", MemoryFile::unreadable());
        start_build(Arc::new(root), proxy.clone(), state.clone());
        wait_for_idle(&mut rx).await;

        start_preview("broken.txt".to_string(), proxy, state);

        loop {
            match tokio::time::timeout(Duration::from_secs(2), rx.recv()).await {
                Ok(Some(UserEvent::ShowFilePreview { content, is_text, .. })) => {
                    assert_eq!(content, crate::core::preview::UNREADABLE_MESSAGE);
                    assert!(!is_text);
                    break;
                }
                Ok(Some(_)) => {}
                _ => panic!("no preview received"),
            }
        }
    }
}
