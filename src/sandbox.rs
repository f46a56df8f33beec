//! Best-effort process confinement once the input is open.
//!
//! After the log (and GeoIP database) are open the pass only reads from
//! already-open descriptors and writes the report to stdout. On Linux the
//! filesystem becomes read-only and TCP bind/connect are denied through
//! Landlock. Older kernels get whatever subset they support, platforms
//! without a suitable facility continue unconfined.

/// How much of the confinement the platform could apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confinement {
    /// Read-only filesystem and no TCP sockets.
    Full,
    /// Some restrictions were applied, typically the filesystem ones only.
    Partial,
    /// Nothing was applied.
    Unavailable,
}

/// Confine the calling thread and the threads it spawns afterwards.
///
/// Failures are logged and reported as [`Confinement::Unavailable`], they
/// never abort the pass.
pub fn restrict() -> Confinement {
    imp::restrict()
}

#[cfg(target_os = "linux")]
mod imp {
    use landlock::{
        path_beneath_rules, Access, AccessFs, AccessNet, Ruleset, RulesetAttr, RulesetCreatedAttr,
        RulesetError, RulesetStatus, ABI,
    };
    use tracing::{debug, warn};

    use super::Confinement;

    /// Newest ABI we know how to use, older kernels are handled best-effort.
    const TARGET_ABI: ABI = ABI::V4;

    pub(super) fn restrict() -> Confinement {
        // forbid gaining privileges through setuid binaries or file capabilities
        if let Err(errno) = nix::sys::prctl::set_no_new_privs() {
            warn!(%errno, "sandbox: failed to set no_new_privs");
        }

        match landlock() {
            Ok(RulesetStatus::FullyEnforced) => {
                debug!("sandbox: read-only filesystem, network denied");
                Confinement::Full
            }
            Ok(RulesetStatus::PartiallyEnforced) => {
                debug!("sandbox: partially enforced, kernel lacks some landlock features");
                Confinement::Partial
            }
            Ok(RulesetStatus::NotEnforced) => {
                debug!("sandbox: landlock not supported by this kernel");
                Confinement::Unavailable
            }
            Err(e) => {
                warn!(error = %e, "sandbox: failed to apply landlock ruleset");
                Confinement::Unavailable
            }
        }
    }

    fn landlock() -> Result<RulesetStatus, RulesetError> {
        let status = Ruleset::default()
            .handle_access(AccessFs::from_all(TARGET_ABI))?
            .handle_access(AccessNet::from_all(TARGET_ABI))?
            .create()?
            .add_rules(path_beneath_rules(&["/"], AccessFs::from_read(TARGET_ABI)))?
            .restrict_self()?;
        Ok(status.ruleset)
    }
}

#[cfg(not(target_os = "linux"))]
mod imp {
    use tracing::debug;

    use super::Confinement;

    pub(super) fn restrict() -> Confinement {
        debug!("sandbox: no restriction facility on this platform");
        Confinement::Unavailable
    }
}
