//! The crawl's content tree, built from a [`CvBundle`], and the change
//! classification used to decide whether a re-render needs a re-measure.

use crate::cv::CvBundle;
use crate::language::Language;

/// Colour of the crawl text. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlTint {
    #[default]
    Gold,
    Pale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Item,
    CertificationName,
    CertificationDetail,
    /// Blank gap between jobs.
    Break,
}

impl BlockKind {
    /// Switching to or from a bullet or a gap adds or removes rendered
    /// content, so the block may wrap differently.
    fn changes_layout(self, other: BlockKind) -> bool {
        self != other
            && [self, other]
                .iter()
                .any(|kind| matches!(kind, BlockKind::Item | BlockKind::Break))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlBlock {
    pub kind: BlockKind,
    /// Emphasized lead-in rendered before `text`.
    pub strong: Option<String>,
    pub text: String,
}

impl CrawlBlock {
    fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            strong: None,
            text: text.into(),
        }
    }

    fn emphasized(kind: BlockKind, strong: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            strong: Some(strong.into()),
            text: text.into(),
        }
    }

    fn char_len(&self) -> usize {
        self.strong.as_deref().map_or(0, |s| s.chars().count()) + self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSection {
    pub id: &'static str,
    /// Uppercased heading; the summary has none.
    pub title: Option<String>,
    pub blocks: Vec<CrawlBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Style,
    Class,
}

/// What differs between two renders of the crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChange {
    Attribute(AttributeKind),
    ChildList,
    CharacterData,
}

impl ContentChange {
    /// Changes that can alter the content's height.
    pub fn is_structural(self) -> bool {
        !matches!(self, ContentChange::Attribute(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrawlDocument {
    pub language: Language,
    pub tint: CrawlTint,
    pub sections: Vec<CrawlSection>,
}

impl CrawlDocument {
    pub fn render(bundle: &CvBundle, tint: CrawlTint) -> Self {
        let lang = bundle.language;
        let data = &bundle.data;
        let desc = &bundle.descriptions;
        let titles = &desc.sections;
        let mut sections = Vec::new();

        if let Some(about) = desc.about.as_deref().filter(|about| !about.is_empty()) {
            sections.push(CrawlSection {
                id: "summary",
                title: None,
                blocks: vec![CrawlBlock::new(BlockKind::Paragraph, about)],
            });
        }

        if let Some(title) = &titles.key_achievements {
            let blocks = desc
                .key_achievements
                .iter()
                .filter_map(|achievement| {
                    let heading = achievement.title.as_ref().map_or("", |t| t.resolve(lang));
                    let body = achievement
                        .description
                        .as_ref()
                        .map_or("", |d| d.resolve(lang));
                    match (heading.is_empty(), body.is_empty()) {
                        (false, false) => Some(CrawlBlock::emphasized(
                            BlockKind::Item,
                            heading,
                            format!(": {body}"),
                        )),
                        (false, true) => Some(CrawlBlock::new(BlockKind::Item, heading)),
                        (true, false) => Some(CrawlBlock::new(BlockKind::Item, body)),
                        (true, true) => None,
                    }
                })
                .collect();
            sections.push(section("achievements", title, blocks));
        }

        if let Some(title) = &titles.tech_stack {
            let blocks = data
                .tech_stack
                .iter()
                .map(|skill| CrawlBlock::new(BlockKind::Item, skill.as_str()))
                .collect();
            sections.push(section("skills", title, blocks));
        }

        if let Some(title) = &titles.work_experience {
            let mut blocks = Vec::new();
            let count = data.work_experience.len();
            for (idx, job) in data.work_experience.iter().enumerate() {
                blocks.push(CrawlBlock::emphasized(
                    BlockKind::Paragraph,
                    job.title.resolve(lang),
                    format!(" - {}", job.company.resolve(lang)),
                ));
                blocks.push(CrawlBlock::new(
                    BlockKind::Paragraph,
                    job.period.resolve(lang),
                ));
                let description = job
                    .key
                    .as_ref()
                    .and_then(|key| desc.work_experience.get(key))
                    .and_then(|entry| entry.description.as_deref())
                    .filter(|text| !text.is_empty());
                if let Some(text) = description {
                    blocks.push(CrawlBlock::new(BlockKind::Paragraph, text));
                }
                if idx + 1 < count {
                    blocks.push(CrawlBlock::new(BlockKind::Break, ""));
                }
            }
            sections.push(section("experience", title, blocks));
        }

        if let Some(title) = &titles.education {
            let blocks = data
                .education
                .iter()
                .map(|edu| {
                    CrawlBlock::new(
                        BlockKind::Item,
                        format!(
                            "{} - {} ({})",
                            edu.title.resolve(lang),
                            edu.institution,
                            edu.period.resolve(lang)
                        ),
                    )
                })
                .collect();
            sections.push(section("education", title, blocks));
        }

        if let Some(title) = &titles.certifications {
            let mut blocks = Vec::new();
            for cert in &data.certifications {
                blocks.push(CrawlBlock::new(
                    BlockKind::CertificationName,
                    cert.name.resolve(lang),
                ));
                if let Some(issuer) = cert
                    .issuer
                    .as_ref()
                    .map(|issuer| issuer.resolve(lang))
                    .filter(|issuer| !issuer.is_empty())
                {
                    blocks.push(CrawlBlock::new(BlockKind::CertificationDetail, issuer));
                }
                if let Some(year) = &cert.year {
                    blocks.push(CrawlBlock::new(
                        BlockKind::CertificationDetail,
                        year.to_string(),
                    ));
                }
            }
            sections.push(section("certifications", title, blocks));
        }

        if let Some(title) = &titles.languages {
            let blocks = data
                .languages
                .iter()
                .map(|spoken| {
                    CrawlBlock::new(
                        BlockKind::Item,
                        format!("{} - {}", spoken.name.resolve(lang), spoken.level.resolve(lang)),
                    )
                })
                .collect();
            sections.push(section("languages", title, blocks));
        }

        if let Some(title) = &titles.projects {
            let blocks = data
                .projects
                .iter()
                .filter_map(|project| desc.projects.get(project.key.as_ref()?))
                .filter_map(|project| {
                    let name = project.name.as_ref().map_or("", |n| n.resolve(lang));
                    let body = project
                        .description
                        .as_ref()
                        .map_or("", |d| d.resolve(lang));
                    let text = match (name.is_empty(), body.is_empty()) {
                        (false, false) => format!("{name}: {body}"),
                        (false, true) => name.to_string(),
                        (true, false) => body.to_string(),
                        (true, true) => return None,
                    };
                    Some(CrawlBlock::new(BlockKind::Item, text))
                })
                .collect();
            sections.push(section("projects", title, blocks));
        }

        if let Some(title) = &titles.hobbies {
            let blocks = data
                .hobbies
                .iter()
                .map(|hobby| CrawlBlock::new(BlockKind::Item, hobby.resolve(lang)))
                .collect();
            sections.push(section("hobbies", title, blocks));
        }

        Self {
            language: lang,
            tint,
            sections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Classify what changed between two renders. Identical documents yield
    /// no changes.
    pub fn diff(old: &CrawlDocument, new: &CrawlDocument) -> Vec<ContentChange> {
        let mut changes = Vec::new();
        let mut note = |change: ContentChange| {
            if !changes.contains(&change) {
                changes.push(change);
            }
        };

        if old.tint != new.tint {
            note(ContentChange::Attribute(AttributeKind::Style));
        }
        if old.sections.len() != new.sections.len() {
            note(ContentChange::ChildList);
            return changes;
        }

        for (before, after) in old.sections.iter().zip(&new.sections) {
            if before.id != after.id
                || before.title.is_some() != after.title.is_some()
                || before.blocks.len() != after.blocks.len()
            {
                note(ContentChange::ChildList);
                continue;
            }
            if before.title != after.title {
                note(ContentChange::CharacterData);
            }
            for (a, b) in before.blocks.iter().zip(&after.blocks) {
                if a.strong.is_some() != b.strong.is_some() || a.kind.changes_layout(b.kind) {
                    note(ContentChange::ChildList);
                } else if a.text != b.text || a.strong != b.strong {
                    note(ContentChange::CharacterData);
                } else if a.kind != b.kind {
                    note(ContentChange::Attribute(AttributeKind::Class));
                }
            }
        }
        changes
    }

    /// Rough rendered height, used until the real layout is reported.
    ///
    /// Approximates how many characters fit on a line at this font size and
    /// width, then sums wrapped lines, headings and section gaps.
    pub fn estimated_height(&self, font_size: f32, line_spacing: f32, width: f32) -> f32 {
        let font_size = font_size.max(1.0);
        let line_height = font_size * line_spacing.max(1.0);
        let glyph_width = font_size * 0.55;
        let chars_per_line = (width.max(glyph_width) / glyph_width).floor().max(1.0) as usize;

        let mut lines = 0usize;
        let mut headings = 0usize;
        for section in &self.sections {
            if section.title.is_some() {
                headings += 1;
            }
            for block in &section.blocks {
                lines += match block.kind {
                    BlockKind::Break => 1,
                    _ => block.char_len().div_ceil(chars_per_line).max(1),
                };
            }
        }

        let heading_height = line_height * 1.3;
        let section_gap = line_height;
        lines as f32 * line_height
            + headings as f32 * heading_height
            + self.sections.len().saturating_sub(1) as f32 * section_gap
    }
}

fn section(id: &'static str, title: &str, blocks: Vec<CrawlBlock>) -> CrawlSection {
    CrawlSection {
        id,
        title: Some(title.to_uppercase()),
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::{CvData, Descriptions};

    fn bundle(language: Language) -> CvBundle {
        let data: CvData = serde_json::from_str(
            r#"{
                "personal": {"name": "Ada"},
                "techStack": ["Rust", "Tokio"],
                "workExperience": [
                    {"key": "a", "title": {"en": "Engineer", "pt": "Engenheira"}, "company": "Acme", "period": {"en": "2020 - Present"}},
                    {"key": "b", "title": "Intern", "company": "Initech", "period": "2019"}
                ],
                "certifications": [{"name": "CKA", "issuer": "CNCF", "year": 2022}],
                "languages": [{"name": {"en": "Portuguese"}, "level": {"en": "Native"}}],
                "projects": [{"key": "crawl"}, {"key": "unknown"}],
                "hobbies": [{"en": "Chess", "pt": "Xadrez"}]
            }"#,
        )
        .unwrap();
        let descriptions: Descriptions = serde_json::from_str(
            r#"{
                "about": "Builds things.",
                "sections": {
                    "keyAchievements": "Key Achievements",
                    "techStack": "Tech Stack",
                    "workExperience": "Experience",
                    "education": "Education",
                    "certifications": "Certifications",
                    "languages": "Languages",
                    "projects": "Projects",
                    "hobbies": "Hobbies"
                },
                "keyAchievements": [{"title": "Scale", "description": "10x traffic"}, {}],
                "workExperience": {"a": {"description": "Shipped the engine."}},
                "projects": {"crawl": {"name": "Crawl", "description": "Scrolling text"}}
            }"#,
        )
        .unwrap();
        CvBundle {
            language,
            data,
            descriptions,
        }
    }

    #[test]
    fn sections_follow_crawl_order_with_uppercase_titles() {
        let doc = CrawlDocument::render(&bundle(Language::En), CrawlTint::Gold);
        let ids: Vec<_> = doc.sections.iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            [
                "summary",
                "achievements",
                "skills",
                "experience",
                "education",
                "certifications",
                "languages",
                "projects",
                "hobbies"
            ]
        );
        assert_eq!(doc.sections[0].title, None);
        assert_eq!(doc.sections[2].title.as_deref(), Some("TECH STACK"));
    }

    #[test]
    fn entries_are_rendered_and_empty_ones_skipped() {
        let doc = CrawlDocument::render(&bundle(Language::En), CrawlTint::Gold);
        let achievements = &doc.sections[1].blocks;
        assert_eq!(achievements.len(), 1);
        assert_eq!(achievements[0].strong.as_deref(), Some("Scale"));
        assert_eq!(achievements[0].text, ": 10x traffic");

        let experience = &doc.sections[3].blocks;
        // title, period, description, break, title, period
        assert_eq!(experience.len(), 6);
        assert_eq!(experience[0].text, " - Acme");
        assert_eq!(experience[3].kind, BlockKind::Break);

        let education = &doc.sections[4];
        assert!(education.blocks.is_empty());

        let certs: Vec<_> = doc.sections[5].blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(certs, ["CKA", "CNCF", "2022"]);

        let projects = &doc.sections[7].blocks;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].text, "Crawl: Scrolling text");
    }

    #[test]
    fn missing_headings_hide_sections() {
        let mut source = bundle(Language::En);
        source.descriptions.sections.tech_stack = None;
        source.descriptions.about = None;
        let doc = CrawlDocument::render(&source, CrawlTint::Gold);
        assert!(doc.sections.iter().all(|s| s.id != "skills" && s.id != "summary"));
    }

    #[test]
    fn tint_change_is_cosmetic() {
        let source = bundle(Language::En);
        let gold = CrawlDocument::render(&source, CrawlTint::Gold);
        let pale = CrawlDocument::render(&source, CrawlTint::Pale);
        let changes = CrawlDocument::diff(&gold, &pale);
        assert_eq!(changes, [ContentChange::Attribute(AttributeKind::Style)]);
        assert!(!changes.iter().any(|c| c.is_structural()));
        assert!(CrawlDocument::diff(&gold, &gold).is_empty());
    }

    #[test]
    fn language_change_is_structural() {
        let en = CrawlDocument::render(&bundle(Language::En), CrawlTint::Gold);
        let pt = CrawlDocument::render(&bundle(Language::Pt), CrawlTint::Gold);
        let changes = CrawlDocument::diff(&en, &pt);
        assert!(changes.contains(&ContentChange::CharacterData));
        assert!(changes.iter().any(|c| c.is_structural()));
    }

    #[test]
    fn removed_entries_change_the_child_list() {
        let source = bundle(Language::En);
        let before = CrawlDocument::render(&source, CrawlTint::Gold);
        let mut trimmed = source.clone();
        trimmed.data.tech_stack.pop();
        let after = CrawlDocument::render(&trimmed, CrawlTint::Gold);
        assert_eq!(
            CrawlDocument::diff(&before, &after),
            [ContentChange::ChildList]
        );
    }

    #[test]
    fn bullet_kind_changes_are_structural() {
        let before = CrawlDocument::render(&bundle(Language::En), CrawlTint::Gold);
        let mut after = before.clone();
        let block = after.sections[2]
            .blocks
            .iter_mut()
            .find(|block| block.kind == BlockKind::Item)
            .unwrap();
        block.kind = BlockKind::Paragraph;
        assert_eq!(CrawlDocument::diff(&before, &after), [ContentChange::ChildList]);

        let mut restyled = before.clone();
        let cert = restyled.sections[5].blocks.first_mut().unwrap();
        assert_eq!(cert.kind, BlockKind::CertificationName);
        cert.kind = BlockKind::CertificationDetail;
        assert_eq!(
            CrawlDocument::diff(&before, &restyled),
            [ContentChange::Attribute(AttributeKind::Class)]
        );
    }

    #[test]
    fn estimated_height_grows_when_narrower() {
        let doc = CrawlDocument::render(&bundle(Language::En), CrawlTint::Gold);
        let wide = doc.estimated_height(20.0, 1.5, 1200.0);
        let narrow = doc.estimated_height(20.0, 1.5, 200.0);
        assert!(wide > 0.0);
        assert!(narrow > wide);
        assert_eq!(CrawlDocument::default().estimated_height(20.0, 1.5, 800.0), 0.0);
    }
}
