use crate::support::{FakeVcs, widget_repo};
use repo_link::provider::SELF_HOSTED;
use repo_link::{
    ProviderOverride, RepoLinkError, RepositoryContext, RevisionKind, SelectionRange,
    TemplateRegistry, resolve,
};
use std::collections::BTreeMap;
use std::path::Path;

async fn context(vcs: &FakeVcs, file: &str) -> RepositoryContext {
    RepositoryContext::discover(vcs, Path::new(file)).await.unwrap()
}

#[tokio::test]
async fn github_default_branch_single_line() {
    let ctx = context(&widget_repo(), "/repo/src/a.ts").await;
    let url = resolve(
        Some(&ctx),
        &TemplateRegistry::builtin(),
        RevisionKind::DefaultBranch,
        SelectionRange::single(10),
    )
    .unwrap();
    assert_eq!(url, "https://github.com/acme/widget/blob/main/src/a.ts#L10");
}

#[tokio::test]
async fn github_default_branch_line_range() {
    let ctx = context(&widget_repo(), "/repo/src/a.ts").await;
    let url = resolve(
        Some(&ctx),
        &TemplateRegistry::builtin(),
        RevisionKind::DefaultBranch,
        SelectionRange::lines(10, 14),
    )
    .unwrap();
    assert!(url.ends_with("#L10-L14"), "{url}");
}

#[tokio::test]
async fn github_current_commit_uses_commit_hash() {
    let ctx = context(&widget_repo(), "/repo/src/a.ts").await;
    let url = resolve(
        Some(&ctx),
        &TemplateRegistry::builtin(),
        RevisionKind::CurrentCommit,
        SelectionRange::single(1),
    )
    .unwrap();
    assert_eq!(
        url,
        "https://github.com/acme/widget/blob/0123456789abcdef0123456789abcdef01234567/src/a.ts#L1"
    );
}

#[tokio::test]
async fn self_hosted_current_commit() {
    let vcs = FakeVcs::repo("/work/svc", "ssh://git@git.corp.internal:7999/team/svc.git")
        .with("commit", "abcd123");
    let ctx = context(&vcs, "/work/svc/lib/x.py").await;
    let url = resolve(
        Some(&ctx),
        &TemplateRegistry::builtin(),
        RevisionKind::CurrentCommit,
        SelectionRange::single(10),
    )
    .unwrap();
    assert_eq!(
        url,
        "https://git.corp.internal/projects/team/repos/svc/browse/lib/x.py?at=abcd123#10"
    );
}

#[tokio::test]
async fn self_hosted_branch_is_qualified_with_refs_heads() {
    let vcs = FakeVcs::repo("/work/svc", "git@git.corp.internal:team/svc.git")
        .with("branch", "feature/login");
    let ctx = context(&vcs, "/work/svc/lib/x.py").await;
    let url = resolve(
        Some(&ctx),
        &TemplateRegistry::builtin(),
        RevisionKind::CurrentBranch,
        SelectionRange::lines(3, 7),
    )
    .unwrap();
    assert_eq!(
        url,
        "https://git.corp.internal/projects/team/repos/svc/browse/lib/x.py?at=refs/heads/feature/login#3-7"
    );
}

#[tokio::test]
async fn gitlab_subgroup_line_range() {
    let vcs = FakeVcs::repo("/src/app", "git@gitlab.com:org/platform/team/app.git")
        .with("default", "develop");
    let ctx = context(&vcs, "/src/app/cmd/main.go").await;
    let url = resolve(
        Some(&ctx),
        &TemplateRegistry::builtin(),
        RevisionKind::DefaultBranch,
        SelectionRange::lines(4, 8),
    )
    .unwrap();
    assert_eq!(url, "https://gitlab.com/team/app/-/blob/develop/cmd/main.go#L4-8");
}

#[tokio::test]
async fn bitbucket_line_anchor() {
    let vcs = FakeVcs::repo("/r", "https://bitbucket.org/acme/widget.git").with("default", "master");
    let ctx = context(&vcs, "/r/README.md").await;
    let registry = TemplateRegistry::builtin();
    let single = resolve(Some(&ctx), &registry, RevisionKind::DefaultBranch, SelectionRange::single(2)).unwrap();
    let range = resolve(Some(&ctx), &registry, RevisionKind::DefaultBranch, SelectionRange::lines(2, 5)).unwrap();
    assert_eq!(single, "https://bitbucket.org/acme/widget/src/master/README.md#lines-2");
    assert_eq!(range, "https://bitbucket.org/acme/widget/src/master/README.md#lines-2:5");
}

#[tokio::test]
async fn path_with_spaces_is_encoded() {
    let ctx = context(&widget_repo(), "/repo/docs/user guide.md").await;
    let url = resolve(
        Some(&ctx),
        &TemplateRegistry::builtin(),
        RevisionKind::DefaultBranch,
        SelectionRange::single(1),
    )
    .unwrap();
    assert_eq!(url, "https://github.com/acme/widget/blob/main/docs/user%20guide.md#L1");
}

#[tokio::test]
async fn resolving_twice_is_identical() {
    let ctx = context(&widget_repo(), "/repo/src/a.ts").await;
    let registry = TemplateRegistry::builtin();
    let selection = SelectionRange::lines(1, 2);
    let first = resolve(Some(&ctx), &registry, RevisionKind::CurrentBranch, selection).unwrap();
    let second = resolve(Some(&ctx), &registry, RevisionKind::CurrentBranch, selection).unwrap();
    assert_eq!(first, second);
}

#[test]
fn no_context_is_unavailable() {
    let result = resolve(
        None,
        &TemplateRegistry::builtin(),
        RevisionKind::DefaultBranch,
        SelectionRange::single(1),
    );
    assert!(matches!(result, Err(RepoLinkError::NoActiveContext)));
}

#[tokio::test]
async fn missing_revision_is_unavailable_but_others_resolve() {
    let vcs = widget_repo().without("default");
    let ctx = context(&vcs, "/repo/src/a.ts").await;
    let registry = TemplateRegistry::builtin();

    let result = resolve(Some(&ctx), &registry, RevisionKind::DefaultBranch, SelectionRange::single(1));
    assert!(matches!(
        result,
        Err(RepoLinkError::RevisionUnknown { kind: RevisionKind::DefaultBranch })
    ));
    assert!(resolve(Some(&ctx), &registry, RevisionKind::CurrentBranch, SelectionRange::single(1)).is_ok());
}

#[tokio::test]
async fn no_template_and_no_fallback_is_unavailable() {
    let ctx = context(&widget_repo(), "/repo/src/a.ts").await;
    let result = resolve(
        Some(&ctx),
        &TemplateRegistry::empty(),
        RevisionKind::DefaultBranch,
        SelectionRange::single(1),
    );
    assert!(matches!(result, Err(RepoLinkError::TemplateMissing { .. })));
}

#[tokio::test]
async fn template_without_scheme_is_malformed() {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        SELF_HOSTED.to_string(),
        ProviderOverride {
            base: Some("{domain}/{owner}/{repo}/{path}".into()),
            branch: Some("{domain}/{owner}/{repo}/{revision}/{path}".into()),
            ..Default::default()
        },
    );
    let registry = TemplateRegistry::merge_overrides(TemplateRegistry::builtin(), &overrides).unwrap();
    let vcs = FakeVcs::repo("/w", "git@git.lan:team/svc.git").with("default", "main");
    let ctx = context(&vcs, "/w/a.rs").await;

    let result = resolve(Some(&ctx), &registry, RevisionKind::DefaultBranch, SelectionRange::single(1));
    assert!(matches!(result, Err(RepoLinkError::MalformedUrl { .. })));
}

#[tokio::test]
async fn override_for_new_host_is_used() {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        "git.lan".to_string(),
        ProviderOverride {
            inherit: Some("github.com".into()),
            ..Default::default()
        },
    );
    let registry = TemplateRegistry::merge_overrides(TemplateRegistry::builtin(), &overrides).unwrap();
    let vcs = FakeVcs::repo("/w", "http://git.lan/team/svc.git").with("default", "main");
    let ctx = context(&vcs, "/w/a.rs").await;

    let url = resolve(Some(&ctx), &registry, RevisionKind::DefaultBranch, SelectionRange::single(5)).unwrap();
    assert_eq!(url, "https://git.lan/team/svc/blob/main/a.rs#L5");
}
