//! Collation of extensions into projects.
//!
//! Extensions sharing a project id, or living inside another extension's
//! directory, collapse into one representative. A project is only as
//! compatible as its weakest enabled member.

use std::collections::BTreeMap;
use std::sync::Arc;

use upstat_core::config::{Platform, ProjectsConfig, UpstatConfig};
use upstat_core::errors::{ConfigError, StorageError};
use upstat_core::traits::{ExtensionRegistry, ResultStore, UpdateRegistry};
use upstat_core::types::{
    Constraint, ExtensionDescriptor, NextStep, ProjectDerived, ProjectType, ProjectView, UpdateStatus, Version,
};

/// Self-test fixtures that deliberately nest and must stay separate.
pub const EXEMPT_FIXTURES: [&str; 2] = ["upgrade_status_test_contrib_error", "upgrade_status_test_submodules"];

/// Project id used by the platform itself.
const PLATFORM_PROJECT: &str = "drupal";

struct Candidate {
    project_id: String,
    descriptor: ExtensionDescriptor,
    compatible: bool,
}

impl Candidate {
    fn merge(&mut self, dropped: &ExtensionDescriptor, dropped_compatible: bool) {
        if dropped.installed {
            self.compatible &= dropped_compatible;
        }
    }
}

pub struct ProjectCollator {
    extensions: Arc<dyn ExtensionRegistry>,
    updates: Arc<dyn UpdateRegistry>,
    store: Arc<dyn ResultStore>,
    platform: Platform,
    settings: ProjectsConfig,
}

impl ProjectCollator {
    pub fn new(
        config: &UpstatConfig,
        extensions: Arc<dyn ExtensionRegistry>,
        updates: Arc<dyn UpdateRegistry>,
        store: Arc<dyn ResultStore>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            extensions,
            updates,
            store,
            platform: config.platform.resolve()?,
            settings: config.projects.clone(),
        })
    }

    /// Recompute every project from the registries and the stored results.
    pub fn collect_projects(&self) -> Result<BTreeMap<String, ProjectView>, StorageError> {
        let candidates = self.group_by_project();
        let candidates = self.collate_nested(candidates);

        let mut projects = BTreeMap::new();
        for candidate in candidates {
            let project_type = self.project_type(&candidate);
            let view = self.derive(candidate, project_type)?;
            projects.insert(view.derived.project_id.clone(), view);
        }
        tracing::debug!(projects = projects.len(), "projects collected");
        Ok(projects)
    }

    fn group_by_project(&self) -> Vec<Candidate> {
        let major = self.platform.major();
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut index: BTreeMap<String, usize> = BTreeMap::new();

        for extension in self.extensions.all() {
            if extension.is_platform() {
                continue;
            }
            let project_id = extension
                .project_id()
                .map(str::to_string)
                .unwrap_or_else(|| extension.machine_name.clone());
            let compatible = extension.next_major_compatible(major);
            match index.get(&project_id) {
                Some(&idx) => candidates[idx].merge(&extension, compatible),
                None => {
                    index.insert(project_id.clone(), candidates.len());
                    candidates.push(Candidate {
                        project_id,
                        descriptor: extension,
                        compatible,
                    });
                }
            }
        }
        candidates
    }

    /// Drop every candidate nested inside another one's directory, folding
    /// it into its outermost ancestor.
    fn collate_nested(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        let dirs: Vec<String> = candidates
            .iter()
            .map(|c| {
                let mut dir = c.descriptor.path_string();
                if !dir.ends_with('/') {
                    dir.push('/');
                }
                dir
            })
            .collect();
        let exempt = |c: &Candidate| EXEMPT_FIXTURES.contains(&c.descriptor.machine_name.as_str());

        let mut absorbed_into: Vec<Option<usize>> = vec![None; candidates.len()];
        for (b, b_dir) in dirs.iter().enumerate() {
            if exempt(&candidates[b]) {
                continue;
            }
            let outermost = dirs
                .iter()
                .enumerate()
                .filter(|(a, a_dir)| {
                    *a != b && b_dir.len() > a_dir.len() && b_dir.starts_with(a_dir.as_str()) && !exempt(&candidates[*a])
                })
                .min_by_key(|(_, a_dir)| a_dir.len())
                .map(|(a, _)| a);
            absorbed_into[b] = outermost;
        }

        for (b, target) in absorbed_into.iter().enumerate() {
            if let Some(a) = *target {
                let dropped = candidates[b].descriptor.clone();
                let dropped_compatible = candidates[b].compatible;
                candidates[a].merge(&dropped, dropped_compatible);
                tracing::debug!(
                    kept = %candidates[a].descriptor.machine_name,
                    dropped = %dropped.machine_name,
                    "nested extension collated"
                );
            }
        }

        candidates
            .into_iter()
            .zip(absorbed_into)
            .filter_map(|(c, target)| target.is_none().then_some(c))
            .collect()
    }

    fn project_type(&self, candidate: &Candidate) -> ProjectType {
        let explicit = candidate.descriptor.project_id();
        if explicit == Some(PLATFORM_PROJECT) {
            return ProjectType::Custom;
        }
        let path = format!("/{}/", candidate.descriptor.path_string().trim_matches('/'));
        let is_fixture = path.contains(self.settings.effective_self_fixture_path());
        if path.contains("/contrib/") && !is_fixture {
            return ProjectType::Contrib;
        }
        if explicit.is_some() {
            ProjectType::Contrib
        } else {
            ProjectType::Custom
        }
    }

    fn derive(&self, candidate: Candidate, project_type: ProjectType) -> Result<ProjectView, StorageError> {
        let descriptor = candidate.descriptor;
        let mut derived = ProjectDerived {
            project_id: candidate.project_id,
            project_type,
            update_status: None,
            update_version: None,
            update_next_major_compatible: None,
            next_major_compatible: candidate.compatible,
            next_step: NextStep::Scan,
        };

        if project_type == ProjectType::Contrib {
            self.resolve_update(&descriptor, &mut derived);
        }

        let is_active_profile = self.settings.active_profile.as_deref() == Some(descriptor.machine_name.as_str());
        derived.next_step = if derived.next_major_compatible && project_type == ProjectType::Contrib {
            NextStep::Relax
        } else if !descriptor.installed && !is_active_profile {
            NextStep::Remove
        } else if derived.update_status == Some(UpdateStatus::Available) {
            NextStep::Update
        } else if project_type == ProjectType::Contrib {
            NextStep::Collaborate
        } else {
            self.store
                .get(&descriptor.machine_name)?
                .map_or(NextStep::Scan, |stored| stored.totals.next_step)
        };

        Ok(ProjectView { descriptor, derived })
    }

    fn resolve_update(&self, descriptor: &ExtensionDescriptor, derived: &mut ProjectDerived) {
        if !descriptor.installed && !self.settings.effective_check_disabled() {
            derived.update_status = Some(UpdateStatus::NotChecked);
            return;
        }
        let latest = self
            .updates
            .release_data(&derived.project_id)
            .and_then(|data| data.latest().cloned());
        let Some(latest) = latest else {
            derived.update_status = Some(UpdateStatus::NotAvailable);
            return;
        };

        let installed = descriptor.info.version.as_deref().unwrap_or("");
        let newer = match (Version::parse_release(&latest.version), Version::parse_release(installed)) {
            (Ok(latest), Ok(installed)) => latest > installed,
            _ => latest.version != installed,
        };
        derived.update_status = Some(if newer {
            UpdateStatus::Available
        } else {
            UpdateStatus::AlreadyInstalled
        });
        derived.update_next_major_compatible = Some(
            latest
                .core_compatibility
                .as_deref()
                .and_then(|raw| Constraint::parse(raw).ok())
                .is_some_and(|c| c.allows(&self.platform.next_major())),
        );
        derived.update_version = Some(latest.version);
    }
}
