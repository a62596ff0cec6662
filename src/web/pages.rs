//! Server-rendered page templates.

use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::markdown::render_readme;
use super::tag_feed::TagFeed;
use super::MAX_TAG_PAGES;
use crate::models::{PaginationParams, PreviewSite, RepositoryDetail, RepositorySummary};

const NO_DESCRIPTION: &str = "No description provided";

fn format_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/assets/site.css";
            }
            body { (body) }
        }
    }
}

fn external_link(href: &str, label: &str) -> Markup {
    html! {
        a.button href=(href) target="_blank" rel="noopener noreferrer" { (label) " ↗" }
    }
}

fn repo_card(repo: &RepositorySummary) -> Markup {
    html! {
        article.card {
            h2 { (repo.name) }
            div.stats {
                span.chip title="Watchers" { "Watchers " (repo.watchers) }
                span.chip.stars title="Stars" { "★ " (repo.stargazers_count) }
            }
            p.description { (repo.description.as_deref().unwrap_or(NO_DESCRIPTION)) }
            dl.facts {
                dt { "Created" }
                dd { (format_time(&repo.created_at)) }
                dt { "Updated" }
                dd { (format_time(&repo.updated_at)) }
                dt { "Open issues" }
                dd { span.chip.issues { (repo.open_issues_count) } }
            }
            div.actions {
                a.button href=(format!("/{}", repo.name)) { "Details" }
                (external_link(&repo.repo_url, "View project"))
            }
        }
    }
}

fn pager(params: PaginationParams, shown: usize) -> Markup {
    let size = params.page_size;
    html! {
        nav.pager {
            @if params.page > 0 {
                a.button href=(format!("/?page={}&pageSize={}", params.page - 1, size)) { "Newer" }
            }
            @if shown == size as usize {
                a.button href=(format!("/?page={}&pageSize={}", params.page + 1, size)) { "Older" }
            }
        }
    }
}

/// Grid of repository cards for one listing page.
pub fn repo_list(org: &str, repos: &[RepositorySummary], params: PaginationParams) -> Markup {
    layout(
        &format!("{org} projects"),
        html! {
            div.page {
                header.hero {
                    h1 { (org) " project showcase" }
                    p { "Public repositories of " (org) ", most recently updated first." }
                }
                @if repos.is_empty() {
                    div.empty { p { "No repositories to show." } }
                } @else {
                    div.grid {
                        @for repo in repos {
                            (repo_card(repo))
                        }
                    }
                }
                (pager(params, repos.len()))
            }
        },
    )
}

fn fact(label: &str, value: &str) -> Markup {
    html! {
        div {
            h3 { (label) }
            p { (value) }
        }
    }
}

fn tag_section(repo: &str, feed: &TagFeed, preview: &PreviewSite) -> Markup {
    html! {
        section {
            h2 { "Tags" }
            div.tags {
                @for tag in feed.tags() {
                    @let link = preview.link(tag);
                    a.chip href=(link.preview_url) target="_blank" rel="noopener noreferrer" {
                        (link.name)
                    }
                }
                @if feed.has_more() && feed.pages_loaded() < MAX_TAG_PAGES {
                    a.button href=(format!("/{}?tags={}", repo, feed.pages_loaded() + 1)) {
                        "Load more"
                    }
                }
            }
        }
    }
}

/// Detail page: header stats, metadata grid, tags and README.
pub fn repo_detail(
    detail: &RepositoryDetail,
    readme: Option<&str>,
    feed: &TagFeed,
    preview: &PreviewSite,
) -> Markup {
    let repo = &detail.summary;
    let description = repo.description.as_deref().unwrap_or(NO_DESCRIPTION);
    let private = if detail.private { "Yes" } else { "No" };
    let readme = readme.filter(|text| !text.trim().is_empty());

    layout(
        &repo.name,
        html! {
            div.page.narrow {
                header.hero {
                    a href="/" { "← Back to repositories" }
                    h1 { (repo.name) }
                    p { (description) }
                }
                section.card {
                    div.repo-header {
                        img src=(detail.avatar_url) alt=(detail.owner) width="80" height="80";
                        div.grow {
                            h2 { (repo.name) " " span.repo-id { "#" (repo.id) } }
                            p.description { (description) }
                            div.stats {
                                span.chip title="Watchers" { "Watchers " (repo.watchers) }
                                span.chip.stars title="Stars" { "★ " (repo.stargazers_count) }
                                span.chip.forks title="Forks" { "Forks " (detail.forks) }
                                span.chip.issues title="Open issues" { "Issues " (repo.open_issues_count) }
                            }
                        }
                        (external_link(&repo.repo_url, "View code"))
                    }
                    div.meta-grid {
                        (fact("Created", &format_time(&repo.created_at)))
                        (fact("Updated", &format_time(&repo.updated_at)))
                        (fact("Language", detail.language.as_deref().unwrap_or("Unknown")))
                        (fact("License", detail.license.as_deref().unwrap_or("None")))
                        (fact("Private", private))
                        (fact("Open issues", &repo.open_issues_count.to_string()))
                    }
                    @if !feed.tags().is_empty() {
                        (tag_section(&repo.name, feed, preview))
                    }
                    @if let Some(readme) = readme {
                        section {
                            h2 { "README" }
                            (PreEscaped(render_readme(readme)))
                        }
                    }
                }
            }
        },
    )
}

/// Shown when a repository cannot be loaded.
pub fn not_found(repo: &str) -> Markup {
    layout(
        "Repository not found",
        html! {
            div.page.narrow {
                div.empty {
                    h1 { "Repository not found" }
                    p { "No repository named " code { (repo) } " could be loaded." }
                    a.button href="/" { "Back to repositories" }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::repo;
    use crate::models::TagPage;

    fn preview() -> PreviewSite {
        PreviewSite::new("nextjs", "0human.website")
    }

    #[test]
    fn test_list_escapes_untrusted_text() {
        let mut summary = RepositorySummary::from(repo(1, "site", 1));
        summary.description = Some("<b>bold</b>".to_string());

        let html = repo_list("0human", &[summary], PaginationParams::default()).into_string();

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("href=\"/site\""));
        assert!(!html.contains("Older"));
    }

    #[test]
    fn test_list_empty_state() {
        let html = repo_list("0human", &[], PaginationParams::default()).into_string();
        assert!(html.contains("No repositories to show."));
    }

    #[test]
    fn test_pager_links() {
        let repos: Vec<RepositorySummary> = (0..2)
            .map(|i| RepositorySummary::from(repo(i, &format!("r{i}"), 1)))
            .collect();
        let html = repo_list("0human", &repos, PaginationParams::new(Some(1), Some(2))).into_string();
        assert!(html.contains("/?page=0&amp;pageSize=2"));
        assert!(html.contains("/?page=2&amp;pageSize=2"));
    }

    #[test]
    fn test_detail_renders_tags_and_readme() {
        let detail = repo(7, "site", 1);
        let mut feed = TagFeed::new();
        let ticket = feed.start();
        feed.apply(
            ticket,
            TagPage {
                tags: vec!["v1.2.3".to_string(), "release-2024".to_string()],
                has_more: true,
            },
        );

        let html = repo_detail(&detail, Some("# Hello"), &feed, &preview()).into_string();

        assert!(html.contains("href=\"https://nextjs-1.2.3.0human.website\""));
        assert!(html.contains("href=\"https://nextjs-release-2024.0human.website\""));
        assert!(html.contains("href=\"/site?tags=2\""));
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<h3>Language</h3><p>TypeScript</p>"));
    }

    #[test]
    fn test_detail_omits_empty_sections() {
        let detail = repo(7, "site", 1);
        let html = repo_detail(&detail, None, &TagFeed::new(), &preview()).into_string();
        assert!(!html.contains("README"));
        assert!(!html.contains("Load more"));
        assert!(html.contains("None"));
    }

    #[test]
    fn test_detail_omits_blank_readme() {
        let detail = repo(7, "site", 1);
        let html = repo_detail(&detail, Some(" \n"), &TagFeed::new(), &preview()).into_string();
        assert!(!html.contains("README"));
        assert!(!html.contains("markdown-body"));
    }

    #[test]
    fn test_no_load_more_at_page_cap() {
        let detail = repo(7, "site", 1);
        let mut feed = TagFeed::new();
        let mut next = Some(feed.start());
        while let Some(ticket) = next {
            let tags = (0..10).map(|i| format!("t{}-{i}", ticket.page())).collect();
            feed.apply(ticket, TagPage { tags, has_more: true });
            next = if feed.pages_loaded() < MAX_TAG_PAGES {
                feed.load_more()
            } else {
                None
            };
        }

        assert!(feed.has_more());
        let html = repo_detail(&detail, None, &feed, &preview()).into_string();
        assert!(html.contains("t19-9"));
        assert!(!html.contains("Load more"));
    }
}
