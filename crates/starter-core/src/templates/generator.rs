//! Per-template project generation

use super::copier;
use super::manifest::Template;
use crate::config::{self, package_json};
use crate::error::{Error, Result};
use crate::progress::{Progress, ProgressEvent, Step};
use crate::project::ProjectConfig;
use crate::readme;
use crate::runtime::{CommandRunner, ExternalCommand};
use std::future::Future;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Everything a generation run needs besides the template itself
pub struct Generator<'a, C, R> {
    config: &'a C,
    runner: &'a R,
    progress: &'a dyn Progress,
}

impl<'a, C, R> Generator<'a, C, R>
where
    C: ProjectConfig,
    R: CommandRunner,
{
    pub fn new(config: &'a C, runner: &'a R, progress: &'a dyn Progress) -> Self {
        Self {
            config,
            runner,
            progress,
        }
    }

    /// Build one template's project directory at `destination` from `blank_base`
    ///
    /// Steps run strictly in order; each depends on the files the previous one
    /// left behind. The first failure aborts.
    pub async fn generate(&self, template: &Template, destination: &Path, blank_base: &Path) -> Result<()> {
        self.step(Step::CopyBase, async {
            let copied = copier::copy_dir(blank_base, destination).await?;
            debug!("Copied {} base file(s) into {}", copied, destination.display());
            Ok::<_, Error>(())
        })
        .await?;

        self.step(Step::Overlay, async {
            let declaration_file = self.config.schema().declaration_file();
            let overlaid = copier::overlay_template(template, destination, declaration_file).await?;
            debug!("Overlaid {} file(s) from {}", overlaid.len(), template.path.display());
            Ok::<_, Error>(())
        })
        .await?;

        if !template.dependencies.is_empty() {
            self.step(
                Step::InstallDependencies,
                self.install(destination, false, &template.dependencies),
            )
            .await?;
        }

        if !template.dev_dependencies.is_empty() {
            self.step(
                Step::InstallDevDependencies,
                self.install(destination, true, &template.dev_dependencies),
            )
            .await?;
        }

        self.step(Step::WriteReadme, async {
            let path = destination.join("README.md");
            let contents = readme::render_template_readme(self.config, template);
            fs::write(&path, contents)
                .await
                .map_err(|e| Error::fs("Failed to write", &path, e))
        })
        .await?;

        self.step(Step::UpdateManifest, async {
            let path = destination.join("package.json");
            let package = config::read_json(&path).await?;
            let package = package_json::apply_template(package, template, &path)?;
            config::write_json(&path, &package).await
        })
        .await
    }

    async fn install(&self, destination: &Path, dev: bool, packages: &[String]) -> Result<()> {
        let mut command = ExternalCommand::new(self.config.package_manager()).arg("add");
        if dev {
            command = command.arg("-D");
        }
        let command = command
            .args(packages.iter().cloned())
            .current_dir(destination);

        self.runner.run(&command).await
    }

    async fn step<F>(&self, step: Step, work: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        self.progress.report(ProgressEvent::StepStarted(step));
        match work.await {
            Ok(()) => {
                self.progress.report(ProgressEvent::StepFinished(step));
                Ok(())
            }
            Err(e) => {
                self.progress.report(ProgressEvent::StepFailed(step));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use crate::templates::{load_templates, Declaration, SchemaProfile};
    use crate::test_support::{
        write_file, write_minimal_astro, RecordingProgress, RecordingRunner, TestFeatures,
        TestProject,
    };
    use tempfile::tempdir;

    fn template(path: &Path, dependencies: &[&str], dev_dependencies: &[&str]) -> Template {
        Declaration {
            name: "blog".to_string(),
            title: "Blog".to_string(),
            description: "A simple blog".to_string(),
            dependencies: dependencies.iter().map(|s| s.to_string()).collect(),
            dev_dependencies: dev_dependencies.iter().map(|s| s.to_string()).collect(),
            extends: Vec::new(),
        }
        .located_at(path)
    }

    #[tokio::test]
    async fn test_template_files_override_base() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("blank");
        write_minimal_astro(&base);

        let source = tmp.path().join("templates/blog");
        write_file(&source.join("template.json"), "{}");
        write_file(&source.join("src/pages/index.astro"), "<h1>My Blog</h1>\n<p>posts</p>\n");

        let dest = tmp.path().join("apps/blog");
        let runner = RecordingRunner::default();
        Generator::new(&TestProject, &runner, &NoProgress)
            .generate(&template(&source, &[], &[]), &dest, &base)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("src/pages/index.astro")).unwrap(),
            "<h1>My Blog</h1>\n<p>posts</p>\n"
        );
        assert!(!dest.join("template.json").exists());
        assert!(dest.join("tsconfig.json").exists());
        // No dependencies, so no package manager calls
        assert!(runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_dependencies_installed_in_destination() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("blank");
        write_minimal_astro(&base);
        let source = tmp.path().join("templates/blog");
        write_file(&source.join("template.json"), "{}");

        let dest = tmp.path().join("apps/blog");
        let runner = RecordingRunner::default();
        Generator::new(&TestProject, &runner, &NoProgress)
            .generate(
                &template(&source, &["@astrojs/mdx", "@astrojs/rss"], &["prettier"]),
                &dest,
                &base,
            )
            .await
            .unwrap();

        assert_eq!(
            runner.command_lines(),
            vec![
                "pnpm add @astrojs/mdx @astrojs/rss".to_string(),
                "pnpm add -D prettier".to_string(),
            ]
        );
        for command in runner.commands() {
            assert_eq!(command.cwd.as_deref(), Some(dest.as_path()));
        }
    }

    #[tokio::test]
    async fn test_readme_and_manifest_rewritten() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("blank");
        write_minimal_astro(&base);
        let source = tmp.path().join("templates/blog");
        write_file(&source.join("template.json"), "{}");
        write_file(&source.join("README.md"), "overlay readme");

        let dest = tmp.path().join("apps/blog");
        Generator::new(&TestProject, &RecordingRunner::default(), &NoProgress)
            .generate(&template(&source, &[], &[]), &dest, &base)
            .await
            .unwrap();

        let readme = std::fs::read_to_string(dest.join("README.md")).unwrap();
        assert!(readme.starts_with("# Blog\nA simple blog\n"));

        let package = std::fs::read_to_string(dest.join("package.json")).unwrap();
        assert!(package.starts_with(
            "{\n  \"name\": \"blog\",\n  \"description\": \"A simple blog\",\n  \"version\": \"0.0.1\",\n  \"type\": \"module\","
        ));
        assert!(package.ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_install_failure_aborts_before_manifest() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("blank");
        write_minimal_astro(&base);
        let source = tmp.path().join("templates/blog");
        write_file(&source.join("template.json"), "{}");

        let dest = tmp.path().join("apps/blog");
        let runner = RecordingRunner::failing_on("add");
        let progress = RecordingProgress::default();
        let err = Generator::new(&TestProject, &runner, &progress)
            .generate(&template(&source, &["@astrojs/mdx"], &["prettier"]), &dest, &base)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ExternalCommand { .. }));
        // Dev dependencies never attempted
        assert_eq!(runner.commands().len(), 1);
        // The base README is still there; the rendered one was never written
        assert_eq!(
            std::fs::read_to_string(dest.join("README.md")).unwrap(),
            "# Astro Starter Kit: Minimal\n"
        );
        assert_eq!(
            progress.events().last().map(String::as_str),
            Some("failed: installing dependencies")
        );
    }

    #[tokio::test]
    async fn test_feature_declaration_skipped_in_overlay() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("blank");
        write_minimal_astro(&base);

        let features = tmp.path().join("features");
        let source = features.join("with-prettier");
        write_file(
            &source.join("feature.json"),
            r#"{"name": "with-prettier", "description": "Prettier with the Astro plugin", "devDependencies": ["prettier"]}"#,
        );
        write_file(&source.join(".prettierrc"), "{}\n");
        // Only the top-level declaration is skipped
        write_file(&source.join("src/template.json"), "{}");

        let feature = load_templates(&features, SchemaProfile::Feature)
            .await
            .unwrap()
            .remove(0);
        let dest = tmp.path().join("packages/with-prettier");
        let runner = RecordingRunner::default();
        Generator::new(&TestFeatures, &runner, &NoProgress)
            .generate(&feature, &dest, &base)
            .await
            .unwrap();

        assert!(!dest.join("feature.json").exists());
        assert!(dest.join(".prettierrc").exists());
        assert!(dest.join("src/template.json").exists());
        assert_eq!(runner.command_lines(), vec!["pnpm add -D prettier".to_string()]);

        let readme = std::fs::read_to_string(dest.join("README.md")).unwrap();
        assert!(readme.starts_with("# with-prettier\nPrettier with the Astro plugin\n"));
        assert!(readme.contains("--template test/starters/packages/with-prettier"));

        let package = std::fs::read_to_string(dest.join("package.json")).unwrap();
        assert!(package.starts_with(
            "{\n  \"name\": \"with-prettier\",\n  \"description\": \"Prettier with the Astro plugin\","
        ));
    }

    #[tokio::test]
    async fn test_missing_base_fails_generation() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("templates/blog");
        write_file(&source.join("template.json"), "{}");

        let err = Generator::new(&TestProject, &RecordingRunner::default(), &NoProgress)
            .generate(
                &template(&source, &[], &[]),
                &tmp.path().join("apps/blog"),
                &tmp.path().join("blank"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
