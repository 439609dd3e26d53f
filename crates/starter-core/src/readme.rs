//! README rendering for generated templates and the repository index

use crate::project::ProjectConfig;
use crate::templates::Template;
use chrono::NaiveDate;

/// GitHub web URL of the repository
fn repository_url<C: ProjectConfig>(config: &C) -> String {
    format!("https://github.com/{}", config.repository())
}

/// README written into each generated project
pub fn render_template_readme<C: ProjectConfig>(config: &C, template: &Template) -> String {
    let pm = config.package_manager();

    format!(
        r#"# {title}
{description}

## Create your new Astro project by running.
```sh
{pm} create astro@latest --template {repository}/{output_dir}/{name}
```

## 🧞 Commands

All commands are run from the root of the project, from a terminal:

| Command                | Action                                           |
| :--------------------- | :----------------------------------------------- |
| `{pm} install`         | Installs dependencies                            |
| `{pm} dev`             | Starts local dev server at `localhost:4321`      |
| `{pm} build`           | Build your production site to `./dist/`          |
| `{pm} preview`         | Preview your build locally, before deploying     |
| `{pm} astro ...`       | Run CLI commands like `astro add`, `astro check` |
| `{pm} astro -- --help` | Get help using the Astro CLI                     |

## 👀 Want to learn more?

Feel free to check Astro [documentation]({docs}) or [Discord server]({community}).
"#,
        title = template.title,
        description = template.description,
        repository = config.repository(),
        output_dir = config.output_dir(),
        name = template.name,
        docs = config.docs_url(),
        community = config.community_url(),
    )
}

/// Markdown table row linking a template's build output
pub fn index_row<C: ProjectConfig>(config: &C, template: &Template) -> String {
    format!(
        "| [{}]({}/tree/main/{}/{}) | {} |",
        template.title,
        repository_url(config),
        config.output_dir(),
        template.name,
        template.description
    )
}

/// Aggregate README listing every template, stamped with `date`
pub fn render_index_readme<C: ProjectConfig>(
    config: &C,
    templates: &[Template],
    date: NaiveDate,
) -> String {
    let rows = templates
        .iter()
        .map(|t| index_row(config, t))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"# {heading}
{tagline}

| {entity:<22} | Description                                      |
| :--------------------- | :----------------------------------------------- |
{rows}

> Updated on {date}

License [MIT]({repository}/blob/main/LICENSE)
"#,
        heading = config.display_name(),
        tagline = config.tagline(),
        entity = capitalize(config.schema().entity()),
        rows = rows,
        date = date.format("%-m/%-d/%Y"),
        repository = repository_url(config),
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
