use crate::support::{FakeVcs, widget_repo};
use repo_link::{Action, ContextCache, RepoLinkError, SelectionRange, TemplateRegistry, UrlOpener};
use std::cell::RefCell;
use std::path::Path;

#[derive(Default)]
struct RecordingOpener {
    opened: RefCell<Vec<String>>,
    fail: bool,
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), RepoLinkError> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            return Err(RepoLinkError::OpenFailed {
                url: url.to_string(),
                source: std::io::Error::other("no browser"),
            });
        }
        Ok(())
    }
}

async fn cache_for(vcs: &FakeVcs, file: &str) -> ContextCache {
    let mut cache = ContextCache::new();
    cache.refresh(vcs, Some(Path::new(file))).await;
    cache
}

#[tokio::test]
async fn run_opens_resolved_url() {
    let cache = cache_for(&widget_repo(), "/repo/src/a.ts").await;
    let opener = RecordingOpener::default();

    let url = Action::OpenDefaultBranch.run(
        &cache,
        &TemplateRegistry::builtin(),
        SelectionRange::single(10),
        &opener,
    );

    assert_eq!(
        url.as_deref(),
        Some("https://github.com/acme/widget/blob/main/src/a.ts#L10")
    );
    assert_eq!(opener.opened.borrow().as_slice(), [url.unwrap()]);
}

#[tokio::test]
async fn run_outside_repository_is_a_no_op() {
    let cache = cache_for(&FakeVcs::default(), "/tmp/notes.txt").await;
    let opener = RecordingOpener::default();
    let registry = TemplateRegistry::builtin();

    for action in Action::ALL {
        assert!(!action.is_enabled(&cache));
        assert!(action.run(&cache, &registry, SelectionRange::single(1), &opener).is_none());
    }
    assert!(opener.opened.borrow().is_empty());
}

#[tokio::test]
async fn run_swallows_opener_failure() {
    let cache = cache_for(&widget_repo(), "/repo/src/a.ts").await;
    let opener = RecordingOpener {
        fail: true,
        ..Default::default()
    };

    let url = Action::OpenCurrentCommit.run(
        &cache,
        &TemplateRegistry::builtin(),
        SelectionRange::single(1),
        &opener,
    );
    assert!(url.is_some());
}

#[tokio::test]
async fn run_with_unknown_revision_is_a_no_op() {
    let cache = cache_for(&widget_repo().without("commit"), "/repo/src/a.ts").await;
    let opener = RecordingOpener::default();
    let url = Action::OpenCurrentCommit.run(
        &cache,
        &TemplateRegistry::builtin(),
        SelectionRange::single(1),
        &opener,
    );
    assert!(url.is_none());
    assert!(opener.opened.borrow().is_empty());
}

#[tokio::test]
async fn current_branch_action_hidden_on_default_branch() {
    let cache = cache_for(&widget_repo(), "/repo/src/a.ts").await;
    assert!(Action::OpenDefaultBranch.is_enabled(&cache));
    assert!(Action::OpenCurrentCommit.is_enabled(&cache));
    assert!(!Action::OpenCurrentBranch.is_enabled(&cache));

    let cache = cache_for(&widget_repo().with("branch", "topic"), "/repo/src/a.ts").await;
    assert!(Action::OpenCurrentBranch.is_enabled(&cache));
}

#[test]
fn for_revision_inverts_revision_kind() {
    for action in Action::ALL {
        assert_eq!(Action::for_revision(action.revision_kind()), action);
    }
}
