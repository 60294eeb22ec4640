//! Page content: slides, their nested subsections and the nav links.
//!
//! Membership is fixed when the site is built; only geometry changes later.

use super::labels::LabelTable;

/// A nested content item within a slide.
#[derive(Debug, Clone)]
pub struct Subsection {
    pub id: String,
    pub lines: Vec<String>,
}

/// A top-level, horizontally scrolled section.
#[derive(Debug, Clone)]
pub struct Slide {
    pub id: String,
    pub lines: Vec<String>,
    pub subsections: Vec<Subsection>,
}

/// A navigation entry pointing at a slide by fragment (`"#two"`).
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    /// Slide id the link points at, `None` when the href has no fragment.
    pub fn target(&self) -> Option<&str> {
        self.href
            .split_once('#')
            .map(|(_, frag)| frag)
            .filter(|frag| !frag.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Site {
    pub slides: Vec<Slide>,
    pub nav: Vec<NavLink>,
    pub labels: LabelTable,
}

impl Site {
    /// Index of the slide with `id`.
    pub fn slide_index(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// The built-in portfolio.
    pub fn portfolio() -> Self {
        let mut labels = LabelTable::new();
        labels.set_section("one", "CONTACT ME");
        labels.set_section("two", "GRAPHICS DESIGN");
        labels.set_section("three", "GAME DEVELOPMENT");
        labels.set_section("four", "WEB DEVELOPMENT");

        labels.set_subsection("posters", "Posters");
        labels.set_subsection("announcements", "Announcements");
        labels.set_subsection("leaderboards", "Rankings");
        labels.set_subsection("logos", "Logos");
        labels.set_subsection("stickers", "Stickers");
        labels.set_subsection("magazines", "Magazine Pages");
        labels.set_subsection("banners", "Cover Banners / Headers");

        let slides = vec![
            slide(
                "one",
                &[
                    "Open for freelance and full-time work.",
                    "",
                    "mail      hello@folio.dev",
                    "github    github.com/folio",
                    "itch.io   folio.itch.io",
                ],
                vec![],
            ),
            slide(
                "two",
                &["Print, social and brand work."],
                vec![
                    sub("posters", &["Event posters", "A2 / A3 print runs"]),
                    sub("announcements", &["Patch notes and", "launch graphics"]),
                    sub("leaderboards", &["Weekly tournament", "ranking boards"]),
                    sub("logos", &["Marks for clubs,", "teams and studios"]),
                    sub("stickers", &["Die-cut sticker", "sheets"]),
                    sub("magazines", &["Spreads for a", "student magazine"]),
                    sub("banners", &["Channel covers", "and page headers"]),
                ],
            ),
            slide(
                "three",
                &["Small games, mostly made in a weekend."],
                vec![
                    sub("jam-entries", &["48h jam builds", "with post-mortems"]),
                    sub("engine_tools", &["Level editor and", "asset pipeline"]),
                    sub("prototypes", &["Mechanics sketches"]),
                ],
            ),
            slide(
                "four",
                &[
                    "Sites and front-ends.",
                    "",
                    "This page scrolls sideways; the wheel works too.",
                ],
                vec![],
            ),
        ];

        let nav = [
            ("Contact", "#one"),
            ("Graphics", "#two"),
            ("Games", "#three"),
            ("Web", "#four"),
        ]
        .into_iter()
        .map(|(label, href)| NavLink {
            label: label.to_string(),
            href: href.to_string(),
        })
        .collect();

        Self { slides, nav, labels }
    }
}

fn slide(id: &str, lines: &[&str], subsections: Vec<Subsection>) -> Slide {
    Slide {
        id: id.to_string(),
        lines: lines.iter().map(|l| l.to_string()).collect(),
        subsections,
    }
}

fn sub(id: &str, lines: &[&str]) -> Subsection {
    Subsection {
        id: id.to_string(),
        lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_targets_come_from_fragments() {
        let link = |href: &str| NavLink {
            label: String::new(),
            href: href.to_string(),
        };
        assert_eq!(link("#two").target(), Some("two"));
        assert_eq!(link("/index.html#four").target(), Some("four"));
        assert_eq!(link("/about").target(), None);
        assert_eq!(link("#").target(), None);
    }

    #[test]
    fn every_nav_link_points_at_a_slide() {
        let site = Site::portfolio();
        for link in &site.nav {
            let target = link.target().unwrap_or_default();
            assert!(site.slide_index(target).is_some(), "dangling link {}", link.href);
        }
    }

    #[test]
    fn slide_ids_are_unique() {
        let site = Site::portfolio();
        let mut ids: Vec<_> = site.slides.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), site.slides.len());
    }
}
