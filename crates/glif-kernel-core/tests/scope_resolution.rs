use std::path::{Path, PathBuf};

use glif_kernel_core::scope::{HostProbe, InstallScope, ScopeRequest, resolve_scope};

struct FixedHost {
    privileged: bool,
    prefix: &'static str,
}

impl HostProbe for FixedHost {
    fn is_privileged(&self) -> bool {
        self.privileged
    }

    fn runtime_prefix(&self) -> anyhow::Result<PathBuf> {
        Ok(PathBuf::from(self.prefix))
    }
}

struct NoPrefixHost;

impl HostProbe for NoPrefixHost {
    fn is_privileged(&self) -> bool {
        false
    }

    fn runtime_prefix(&self) -> anyhow::Result<PathBuf> {
        anyhow::bail!("no runtime prefix")
    }
}

const UNPRIVILEGED: FixedHost = FixedHost {
    privileged: false,
    prefix: "/opt/env",
};

const PRIVILEGED: FixedHost = FixedHost {
    privileged: true,
    prefix: "/opt/env",
};

#[test]
fn sys_prefix_overrides_explicit_prefix() {
    for host in [&UNPRIVILEGED, &PRIVILEGED] {
        for user in [false, true] {
            let request = ScopeRequest {
                user,
                sys_prefix: true,
                prefix: Some(PathBuf::from("/custom/path")),
            };
            let scope = resolve_scope(&request, host).expect("resolve_scope should succeed");
            assert_eq!(scope.prefix.as_deref(), Some(Path::new("/opt/env")));
            assert_eq!(scope.user, user);
        }
    }
}

#[test]
fn sys_prefix_without_explicit_prefix_uses_runtime_prefix() {
    let request = ScopeRequest {
        sys_prefix: true,
        ..Default::default()
    };
    let scope = resolve_scope(&request, &UNPRIVILEGED).expect("resolve_scope should succeed");
    assert_eq!(scope, InstallScope::prefix("/opt/env"));
}

#[test]
fn no_prefix_unprivileged_forces_user() {
    let scope = resolve_scope(&ScopeRequest::default(), &UNPRIVILEGED)
        .expect("resolve_scope should succeed");
    assert_eq!(scope, InstallScope::user());
}

#[test]
fn no_prefix_privileged_keeps_system_scope() {
    let scope = resolve_scope(&ScopeRequest::default(), &PRIVILEGED)
        .expect("resolve_scope should succeed");
    assert_eq!(scope, InstallScope::system());
}

#[test]
fn explicit_user_is_kept_when_privileged() {
    let request = ScopeRequest {
        user: true,
        ..Default::default()
    };
    let scope = resolve_scope(&request, &PRIVILEGED).expect("resolve_scope should succeed");
    assert_eq!(scope, InstallScope::user());
}

#[test]
fn explicit_prefix_privileged_is_preserved() {
    let request = ScopeRequest {
        prefix: Some(PathBuf::from("/custom/path")),
        ..Default::default()
    };
    let scope = resolve_scope(&request, &PRIVILEGED).expect("resolve_scope should succeed");
    assert!(!scope.user);
    assert_eq!(scope.prefix, Some(PathBuf::from("/custom/path")));
}

#[test]
fn explicit_prefix_unprivileged_does_not_force_user() {
    let request = ScopeRequest {
        prefix: Some(PathBuf::from("/custom/path")),
        ..Default::default()
    };
    let scope = resolve_scope(&request, &UNPRIVILEGED).expect("resolve_scope should succeed");
    assert_eq!(scope, InstallScope::prefix("/custom/path"));
}

#[test]
fn conflicting_user_and_prefix_pass_through() {
    let request = ScopeRequest {
        user: true,
        sys_prefix: false,
        prefix: Some(PathBuf::from("/custom/path")),
    };
    let scope = resolve_scope(&request, &PRIVILEGED).expect("resolve_scope should succeed");
    assert!(scope.user);
    assert_eq!(scope.prefix, Some(PathBuf::from("/custom/path")));
}

#[test]
fn runtime_prefix_is_only_queried_for_sys_prefix() {
    let scope = resolve_scope(&ScopeRequest::default(), &NoPrefixHost)
        .expect("resolve_scope should succeed");
    assert_eq!(scope, InstallScope::user());

    let request = ScopeRequest {
        sys_prefix: true,
        ..Default::default()
    };
    let err = resolve_scope(&request, &NoPrefixHost).expect_err("missing prefix should fail");
    assert!(err.to_string().contains("runtime prefix"));
}

#[test]
fn empty_prefix_is_treated_as_unset() {
    let request = ScopeRequest {
        prefix: Some(PathBuf::new()),
        ..Default::default()
    };

    let scope = resolve_scope(&request, &UNPRIVILEGED).expect("resolve_scope should succeed");
    assert_eq!(scope, InstallScope::user());

    let scope = resolve_scope(&request, &PRIVILEGED).expect("resolve_scope should succeed");
    assert_eq!(scope, InstallScope::system());
}
