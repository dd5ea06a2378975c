//! End-to-end behaviour of a session: from the run-class action, through a
//! scripted process, to what the panel and notifications end up showing.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use specview_core::api::{
    ActiveFile, AppConfig, ConfigStore, Notification, NotificationLevel, Notifier,
    ProcessEvent, ProcessExecutor, ProcessHandle, Presenter, RunRequest, RunnerError, Session,
    SessionError, SessionServices, Summary, Workspace, NO_TARGET_MESSAGE,
};

#[derive(Default)]
struct Recorded {
    updates: Vec<Summary>,
    visible: bool,
    shows: usize,
    font_sizes: Vec<String>,
    destroyed: bool,
    notifications: Vec<Notification>,
    saves: Vec<PathBuf>,
}

type Shared = Rc<RefCell<Recorded>>;

struct FakePanel(Shared);

impl Presenter for FakePanel {
    fn name(&self) -> &str {
        "fake"
    }
    fn update(&mut self, summary: &Summary) {
        self.0.borrow_mut().updates.push(summary.clone());
    }
    fn show(&mut self) {
        let mut r = self.0.borrow_mut();
        r.visible = true;
        r.shows += 1;
    }
    fn hide(&mut self) {
        self.0.borrow_mut().visible = false;
    }
    fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }
    fn set_font_size(&mut self, size: &str) {
        self.0.borrow_mut().font_sizes.push(size.to_string());
    }
    fn destroy(&mut self) {
        self.0.borrow_mut().destroyed = true;
    }
}

struct FakeNotifier(Shared);

impl Notifier for FakeNotifier {
    fn notify(&self, notification: &Notification) {
        self.0.borrow_mut().notifications.push(notification.clone());
    }
}

struct FakeWorkspace {
    active: Option<ActiveFile>,
    rec: Shared,
}

impl Workspace for FakeWorkspace {
    fn active_file(&self) -> Option<ActiveFile> {
        self.active.clone()
    }
    fn save(&mut self, file: &ActiveFile) -> std::io::Result<()> {
        if let Some(p) = &file.path {
            self.rec.borrow_mut().saves.push(p.clone());
        }
        Ok(())
    }
    fn project_folder(&self, _file: &Path) -> Option<PathBuf> {
        Some(PathBuf::from("/project"))
    }
    fn root_folder(&self) -> Option<PathBuf> {
        Some(PathBuf::from("/project"))
    }
    fn open(&mut self, path: &Path) -> std::io::Result<()> {
        self.active = Some(ActiveFile {
            path: Some(path.to_path_buf()),
            modified: false,
        });
        Ok(())
    }
}

#[derive(Clone, Default)]
struct ScriptedExecutor {
    script: Vec<ProcessEvent>,
    requests: Arc<Mutex<Vec<RunRequest>>>,
}

#[async_trait]
impl ProcessExecutor for ScriptedExecutor {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn execute(&self, request: &RunRequest) -> Result<ProcessHandle, RunnerError> {
        self.requests.lock().unwrap().push(request.clone());
        let (tx, rx) = mpsc::channel(self.script.len().max(1));
        for e in self.script.clone() {
            tx.send(e).await.unwrap();
        }
        Ok(ProcessHandle {
            pid: None,
            events: rx,
        })
    }
}

fn active(path: &str, modified: bool) -> Option<ActiveFile> {
    Some(ActiveFile {
        path: Some(PathBuf::from(path)),
        modified,
    })
}

fn session(
    cfg: AppConfig,
    script: Vec<ProcessEvent>,
    active: Option<ActiveFile>,
) -> (Session, Shared, Arc<Mutex<Vec<RunRequest>>>) {
    let rec: Shared = Rc::default();
    let executor = ScriptedExecutor {
        script,
        ..Default::default()
    };
    let requests = executor.requests.clone();
    let services = SessionServices {
        executor: Box::new(executor),
        presenter: Box::new(FakePanel(rec.clone())),
        notifier: Box::new(FakeNotifier(rec.clone())),
        workspace: Box::new(FakeWorkspace {
            active,
            rec: rec.clone(),
        }),
    };
    (
        Session::activate(ConfigStore::new(cfg), services),
        rec,
        requests,
    )
}

const PASSING: &str = "\n\n\u{2714} is initializable\nTime: 10 ms, Memory: 4.00 MB\n\nOK (1 test, 1 assertion)\n";

#[tokio::test]
async fn passing_run_notifies_by_default() {
    let (mut s, rec, requests) = session(
        AppConfig::default(),
        vec![
            ProcessEvent::Stdout(PASSING[..20].to_string()),
            ProcessEvent::Stdout(PASSING[20..].to_string()),
            ProcessEvent::Exit(0),
        ],
        active("/project/spec/CartSpec.php", false),
    );

    let result = s.run_class().await.unwrap();
    assert!(result.succeeded);

    let requests = requests.lock().unwrap();
    assert_eq!(
        requests[0],
        RunRequest::new(
            "./vendor/bin/phpspec run /project/spec/CartSpec.php",
            Some(PathBuf::from("/project"))
        )
    );

    let rec = rec.borrow();
    // placeholder on activation, one partial per chunk, one final
    assert_eq!(rec.updates.len(), 4);
    assert!(rec.updates[1].is_error);
    let last = rec.updates.last().unwrap();
    assert!(!last.is_error);
    assert!(last
        .header_html
        .starts_with("<div>CartSpec</div><strong><span>OK (1 test, 1 assertion)</span></strong>"));
    assert_eq!(last.body_html, "&#10004; is initializable");

    assert!(!rec.visible);
    assert_eq!(rec.notifications.len(), 1);
    let n = &rec.notifications[0];
    assert_eq!(n.level, NotificationLevel::Success);
    assert_eq!(n.title, "Test Passed!");
    assert_eq!(
        n.description.as_deref(),
        Some("./vendor/bin/phpspec run /project/spec/CartSpec.php")
    );
    assert_eq!(n.detail.as_deref(), Some(PASSING));
}

#[tokio::test]
async fn passing_run_shows_panel_when_notifications_are_off() {
    let cfg = AppConfig {
        success_as_notifications: false,
        ..AppConfig::default()
    };
    let (mut s, rec, _) = session(
        cfg,
        vec![ProcessEvent::Stdout(PASSING.into()), ProcessEvent::Exit(0)],
        active("/project/spec/CartSpec.php", false),
    );
    s.run_class().await.unwrap();

    let rec = rec.borrow();
    assert!(rec.visible);
    assert!(rec.notifications.is_empty());
}

#[tokio::test]
async fn failure_with_stderr_shows_stderr() {
    let (mut s, rec, _) = session(
        AppConfig {
            failures_as_notifications: true,
            ..AppConfig::default()
        },
        vec![
            ProcessEvent::Stdout("partial output".into()),
            ProcessEvent::Stderr("PHP Fatal error in /project/src/Cart.php:12".into()),
            ProcessEvent::Exit(255),
        ],
        active("/project/spec/CartSpec.php", false),
    );
    let result = s.run_class().await.unwrap();
    assert_eq!(result.exit_code, 255);

    let rec = rec.borrow();
    let last = rec.updates.last().unwrap();
    assert!(last.is_error);
    assert_eq!(
        last.body_html,
        "PHP Fatal error in <a>/project/src/Cart.php:12</a>"
    );
    // stderr failures always open the panel
    assert!(rec.visible);
    assert!(rec.notifications.is_empty());
    drop(rec);

    let links = s.links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].path, "/project/src/Cart.php");
    assert_eq!(links[0].line, Some(12));
}

#[tokio::test]
async fn failure_without_stderr_falls_back_to_stdout() {
    let stdout = "broken spec\n\nFailures!\nTests: 2, Assertions: 2, Failures: 1.\n";
    let (mut s, rec, _) = session(
        AppConfig::default(),
        vec![ProcessEvent::Stdout(stdout.into()), ProcessEvent::Exit(1)],
        active("/project/spec/CartSpec.php", false),
    );
    s.run_class().await.unwrap();

    let rec = rec.borrow();
    let last = rec.updates.last().unwrap();
    assert!(last.is_error);
    assert_eq!(last.body_html, "broken spec");
    assert!(last
        .header_html
        .contains("<strong><span>Tests: 2, Assertions: 2, Failures: 1</span></strong>"));
    assert!(rec.visible);
}

#[tokio::test]
async fn failure_as_notification_when_configured() {
    let (mut s, rec, _) = session(
        AppConfig {
            failures_as_notifications: true,
            ..AppConfig::default()
        },
        vec![ProcessEvent::Stdout("nope".into()), ProcessEvent::Exit(1)],
        active("/project/spec/CartSpec.php", false),
    );
    s.run_class().await.unwrap();

    let rec = rec.borrow();
    assert!(!rec.visible);
    assert_eq!(rec.notifications[0].level, NotificationLevel::Error);
    assert_eq!(rec.notifications[0].title, "Test Failed!");
    assert_eq!(rec.notifications[0].detail.as_deref(), Some("nope"));
}

#[tokio::test]
async fn missing_target_file_aborts_before_spawning() {
    for active_file in [
        None,
        Some(ActiveFile {
            path: None,
            modified: true,
        }),
        active("", false),
    ] {
        let (mut s, rec, requests) =
            session(AppConfig::default(), vec![ProcessEvent::Exit(0)], active_file);

        let err = s.run_class().await.unwrap_err();
        assert!(matches!(err, SessionError::NoTargetFile));
        assert!(requests.lock().unwrap().is_empty());

        let rec = rec.borrow();
        assert_eq!(rec.notifications.len(), 1);
        assert_eq!(rec.notifications[0].level, NotificationLevel::Error);
        assert_eq!(rec.notifications[0].title, NO_TARGET_MESSAGE);
    }
}

#[tokio::test]
async fn visible_panel_is_reset_before_a_run() {
    let (mut s, rec, _) = session(
        AppConfig::default(),
        vec![ProcessEvent::Exit(0)],
        None,
    );
    s.toggle_output();
    assert!(s.is_output_visible());

    let _ = s.run_class().await;
    let rec = rec.borrow();
    assert!(!rec.visible);
    assert_eq!(rec.updates.last().unwrap(), &Summary::placeholder());
}

#[tokio::test]
async fn modified_file_is_saved_when_configured() {
    let (mut s, rec, _) = session(
        AppConfig::default(),
        vec![ProcessEvent::Exit(0)],
        active("/project/spec/CartSpec.php", true),
    );
    s.run_class().await.unwrap();
    assert_eq!(
        rec.borrow().saves,
        vec![PathBuf::from("/project/spec/CartSpec.php")]
    );

    let (mut s, rec, _) = session(
        AppConfig {
            save_before_test: false,
            ..AppConfig::default()
        },
        vec![ProcessEvent::Exit(0)],
        active("/project/spec/CartSpec.php", true),
    );
    s.run_class().await.unwrap();
    assert!(rec.borrow().saves.is_empty());
}

#[tokio::test]
async fn suite_run_has_no_target() {
    let (mut s, _, requests) = session(
        AppConfig {
            use_vendor: false,
            phpspec_path: "/x/phpspec".into(),
            use_phpdbg: true,
            phpdbg_path: "/y/phpdbg".into(),
            ..AppConfig::default()
        },
        vec![ProcessEvent::Exit(0)],
        None,
    );
    s.run_suite().await.unwrap();
    assert_eq!(
        requests.lock().unwrap()[0].command,
        "/y/phpdbg -qrr /x/phpspec run"
    );
}

#[tokio::test]
async fn opened_link_becomes_the_target() {
    let (mut s, _, requests) = session(AppConfig::default(), vec![ProcessEvent::Exit(0)], None);
    s.open(Path::new("/project/spec/OtherSpec.php")).unwrap();
    s.run_class().await.unwrap();
    assert!(requests.lock().unwrap()[0]
        .command
        .ends_with("run /project/spec/OtherSpec.php"));
}

#[tokio::test]
async fn font_size_changes_reach_the_panel() {
    let (mut s, rec, _) = session(AppConfig::default(), vec![], None);
    s.set_config("outputViewFontSize", "18px").unwrap();
    s.set_config("useVendor", "false").unwrap();
    assert_eq!(rec.borrow().font_sizes, vec!["14px", "18px"]);
    assert!(!s.config().use_vendor);
}

#[test]
fn toggles_and_teardown() {
    let (mut s, rec, _) = session(AppConfig::default(), vec![], None);
    assert!(!s.is_main_view_visible());
    assert!(s.toggle());
    assert!(!s.toggle());

    s.toggle_output();
    assert!(s.is_output_visible());
    s.toggle_output();
    assert!(!s.is_output_visible());

    s.toggle_output();
    s.deactivate();
    let rec = rec.borrow();
    assert!(rec.destroyed);
    // the last result stays on screen
    assert!(rec.visible);
}

#[tokio::test]
async fn unexpected_end_of_stream_is_an_error() {
    let (mut s, _, _) = session(
        AppConfig::default(),
        vec![ProcessEvent::Stdout("half".into())],
        active("/project/spec/CartSpec.php", false),
    );
    let err = s.run_class().await.unwrap_err();
    assert!(matches!(err, SessionError::Runner(RunnerError::UnexpectedEof)));
}
