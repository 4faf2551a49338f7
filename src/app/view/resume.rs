//! The two static templates: the styled standard résumé and the plain
//! ATS-friendly column.

use super::super::messages::Message;
use super::super::state::{App, RESUME_SCROLL_ID, STANDARD_MAX_WIDTH_PX};
use crate::cv::{CvBundle, display_url, format_period};
use crate::language::Language;
use crate::theme::{accent_color, muted_color};
use iced::font::Weight;
use iced::widget::text::LineHeight;
use iced::widget::{Column, Text, column, container, image, row, scrollable, text};
use iced::{Element, Font, Length};

const PHOTO_SIZE_PX: f32 = 120.0;

/// One entry of the experience section, with its description resolved.
struct JobEntry<'a> {
    title: &'a str,
    company: &'a str,
    period: String,
    description: Option<&'a str>,
}

fn jobs(bundle: &CvBundle) -> Vec<JobEntry<'_>> {
    let lang = bundle.language;
    bundle
        .data
        .work_experience
        .iter()
        .map(|job| JobEntry {
            title: job.title.resolve(lang),
            company: job.company.resolve(lang),
            period: format_period(job.period.resolve(lang), lang),
            description: job
                .key
                .as_ref()
                .and_then(|key| bundle.descriptions.work_experience.get(key))
                .and_then(|entry| entry.description.as_deref())
                .filter(|text| !text.is_empty()),
        })
        .collect()
}

fn achievements(bundle: &CvBundle) -> Vec<(String, String)> {
    let lang = bundle.language;
    bundle
        .descriptions
        .key_achievements
        .iter()
        .map(|achievement| {
            (
                achievement
                    .title
                    .as_ref()
                    .map_or("", |t| t.resolve(lang))
                    .to_string(),
                achievement
                    .description
                    .as_ref()
                    .map_or("", |d| d.resolve(lang))
                    .to_string(),
            )
        })
        .filter(|(title, body)| !title.is_empty() || !body.is_empty())
        .collect()
}

fn projects(bundle: &CvBundle) -> Vec<(String, String)> {
    let lang = bundle.language;
    bundle
        .data
        .projects
        .iter()
        .filter_map(|project| bundle.descriptions.projects.get(project.key.as_ref()?))
        .map(|project| {
            (
                project
                    .name
                    .as_ref()
                    .map_or("", |n| n.resolve(lang))
                    .to_string(),
                project
                    .description
                    .as_ref()
                    .map_or("", |d| d.resolve(lang))
                    .to_string(),
            )
        })
        .filter(|(name, body)| !name.is_empty() || !body.is_empty())
        .collect()
}

fn contact_lines(bundle: &CvBundle) -> Vec<String> {
    let personal = &bundle.data.personal;
    [
        personal.location.resolve(bundle.language).to_string(),
        personal.email.clone(),
        personal.phone.clone(),
        display_url(&personal.linkedin),
        display_url(&personal.github),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect()
}

fn education_line(bundle: &CvBundle, idx: usize) -> Option<String> {
    let lang = bundle.language;
    let edu = bundle.data.education.get(idx)?;
    Some(format!(
        "{} - {} ({})",
        edu.title.resolve(lang),
        edu.institution,
        format_period(edu.period.resolve(lang), lang)
    ))
}

fn certification_line(bundle: &CvBundle, idx: usize) -> Option<String> {
    let lang = bundle.language;
    let cert = bundle.data.certifications.get(idx)?;
    let mut line = cert.name.resolve(lang).to_string();
    if let Some(issuer) = cert
        .issuer
        .as_ref()
        .map(|issuer| issuer.resolve(lang))
        .filter(|issuer| !issuer.is_empty())
    {
        line.push_str(&format!(" - {issuer}"));
    }
    if let Some(year) = &cert.year {
        line.push_str(&format!(" ({year})"));
    }
    Some(line)
}

fn spoken_line(bundle: &CvBundle, idx: usize, language: Language) -> Option<String> {
    let spoken = bundle.data.languages.get(idx)?;
    Some(format!(
        "{}: {}",
        spoken.name.resolve(language),
        spoken.level.resolve(language)
    ))
}

impl App {
    pub(super) fn standard_view(&self) -> Element<'_, Message> {
        let bundle = &self.content;
        let lang = bundle.language;
        let titles = &bundle.descriptions.sections;
        let size = self.config.font_size as f32;
        let spacing = LineHeight::Relative(self.config.line_spacing);
        let accent = accent_color(self.prefs.theme);
        let muted = muted_color(self.prefs.theme);
        let bold = Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        };

        let heading = |title: &str| -> Text<'static> {
            text(title.to_string())
                .size(size * 1.3)
                .font(bold)
                .color(accent)
        };
        let body = |value: String| -> Text<'static> { text(value).size(size).line_height(spacing) };

        let personal = &bundle.data.personal;
        let mut identity = column![
            text(personal.name.clone()).size(size * 2.2).font(bold),
            text(personal.tagline.resolve(lang).to_string())
                .size(size * 1.2)
                .color(accent),
        ]
        .spacing(6);
        for line in contact_lines(bundle) {
            identity = identity.push(text(line).size(size * 0.9).color(muted));
        }

        let photo_path = (!personal.photo.is_empty()).then(|| self.data_dir.join(&personal.photo));
        let header: Element<'_, Message> = match photo_path.filter(|path| path.is_file()) {
            Some(path) => row![
                image(image::Handle::from_path(path))
                    .width(PHOTO_SIZE_PX)
                    .height(PHOTO_SIZE_PX),
                identity
            ]
            .spacing(24)
            .into(),
            None => identity.into(),
        };

        let mut page = Column::new().push(header).spacing(24);

        if let (Some(title), Some(about)) = (&titles.summary, &bundle.descriptions.about) {
            page = page.push(column![heading(title), body(about.clone())].spacing(8));
        }

        if let Some(title) = &titles.key_achievements {
            let mut section = Column::new().push(heading(title)).spacing(8);
            for (name, detail) in achievements(bundle) {
                let line = if name.is_empty() || detail.is_empty() {
                    format!("{name}{detail}")
                } else {
                    format!("{name}: {detail}")
                };
                section = section.push(body(format!("• {line}")));
            }
            page = page.push(section);
        }

        if let Some(title) = &titles.work_experience {
            let mut section = Column::new().push(heading(title)).spacing(14);
            for job in jobs(bundle) {
                let mut entry = column![
                    text(format!("{} - {}", job.title, job.company))
                        .size(size * 1.05)
                        .font(bold),
                    text(job.period).size(size * 0.9).color(muted),
                ]
                .spacing(4);
                if let Some(description) = job.description {
                    entry = entry.push(body(description.to_string()));
                }
                section = section.push(entry);
            }
            page = page.push(section);
        }

        if let Some(title) = &titles.tech_stack {
            page = page.push(
                column![heading(title), body(bundle.data.tech_stack.join(" · "))].spacing(8),
            );
        }

        if let Some(title) = &titles.education {
            let mut section = Column::new().push(heading(title)).spacing(8);
            for idx in 0..bundle.data.education.len() {
                if let Some(line) = education_line(bundle, idx) {
                    section = section.push(body(line));
                }
            }
            page = page.push(section);
        }

        if let Some(title) = &titles.certifications {
            let mut section = Column::new().push(heading(title)).spacing(8);
            for idx in 0..bundle.data.certifications.len() {
                if let Some(line) = certification_line(bundle, idx) {
                    section = section.push(body(line));
                }
            }
            page = page.push(section);
        }

        if let Some(title) = &titles.languages {
            let mut section = Column::new().push(heading(title)).spacing(8);
            for idx in 0..bundle.data.languages.len() {
                if let Some(line) = spoken_line(bundle, idx, lang) {
                    section = section.push(body(line));
                }
            }
            page = page.push(section);
        }

        if let Some(title) = &titles.projects {
            let mut section = Column::new().push(heading(title)).spacing(8);
            for (name, detail) in projects(bundle) {
                section = section.push(
                    column![
                        text(name).size(size).font(bold),
                        body(detail)
                    ]
                    .spacing(2),
                );
            }
            page = page.push(section);
        }

        if let Some(title) = &titles.hobbies {
            let hobbies = bundle
                .data
                .hobbies
                .iter()
                .map(|hobby| hobby.resolve(lang))
                .filter(|hobby| !hobby.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            page = page.push(column![heading(title), body(hobbies)].spacing(8));
        }

        self.resume_scroll(page)
    }

    /// Single column of plain text, no photo and no colour, so that
    /// automated screeners can read it top to bottom.
    pub(super) fn ats_view(&self) -> Element<'_, Message> {
        let bundle = &self.content;
        let lang = bundle.language;
        let titles = &bundle.descriptions.sections;
        let size = self.config.font_size as f32;
        let spacing = LineHeight::Relative(self.config.line_spacing);
        let heading = |title: &str| -> Text<'static> { text(title.to_uppercase()).size(size * 1.1) };
        let line = |value: String| -> Text<'static> { text(value).size(size).line_height(spacing) };

        let mut page = Column::new()
            .push(text(bundle.data.personal.name.clone()).size(size * 1.6))
            .push(line(bundle.data.personal.tagline.resolve(lang).to_string()))
            .push(line(contact_lines(bundle).join(" | ")))
            .spacing(10);

        if let (Some(title), Some(about)) = (&titles.summary, &bundle.descriptions.about) {
            page = page.push(heading(title)).push(line(about.clone()));
        }
        if let Some(title) = &titles.work_experience {
            page = page.push(heading(title));
            for job in jobs(bundle) {
                page = page.push(line(format!(
                    "{} | {} | {}",
                    job.title, job.company, job.period
                )));
                if let Some(description) = job.description {
                    page = page.push(line(description.to_string()));
                }
            }
        }
        if let Some(title) = &titles.key_achievements {
            page = page.push(heading(title));
            for (name, detail) in achievements(bundle) {
                page = page.push(line(format!("- {name} {detail}").trim_end().to_string()));
            }
        }
        if let Some(title) = &titles.tech_stack {
            page = page
                .push(heading(title))
                .push(line(bundle.data.tech_stack.join(", ")));
        }
        if let Some(title) = &titles.education {
            page = page.push(heading(title));
            for idx in 0..bundle.data.education.len() {
                if let Some(entry) = education_line(bundle, idx) {
                    page = page.push(line(entry));
                }
            }
        }
        if let Some(title) = &titles.certifications {
            page = page.push(heading(title));
            for idx in 0..bundle.data.certifications.len() {
                if let Some(entry) = certification_line(bundle, idx) {
                    page = page.push(line(entry));
                }
            }
        }
        if let Some(title) = &titles.languages {
            page = page.push(heading(title));
            for idx in 0..bundle.data.languages.len() {
                if let Some(entry) = spoken_line(bundle, idx, lang) {
                    page = page.push(line(entry));
                }
            }
        }

        self.resume_scroll(page)
    }

    fn resume_scroll<'a>(&self, page: Column<'a, Message>) -> Element<'a, Message> {
        scrollable(
            container(page.max_width(STANDARD_MAX_WIDTH_PX))
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding([24, self.config.margin_horizontal]),
        )
        .id(RESUME_SCROLL_ID.clone())
        .height(Length::Fill)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::{CvData, Descriptions};

    fn bundle() -> CvBundle {
        let data: CvData = serde_json::from_str(
            r#"{
                "personal": {
                    "name": "Ada",
                    "location": {"pt": "Londres", "en": "London"},
                    "email": "ada@example.com",
                    "github": "https://github.com/ada"
                },
                "workExperience": [
                    {"key": "engines", "title": "Engineer", "company": "Engines Ltd",
                     "period": {"en": "June 1843 - Present", "pt": "Junho 1843 - Presente"}}
                ],
                "certifications": [{"name": "Numbers", "issuer": "Royal Society", "year": 1843}]
            }"#,
        )
        .unwrap();
        let descriptions: Descriptions = serde_json::from_str(
            r#"{"workExperience": {"engines": {"description": "Wrote the first program."}}}"#,
        )
        .unwrap();
        CvBundle {
            language: Language::En,
            data,
            descriptions,
        }
    }

    #[test]
    fn contact_lines_skip_blanks_and_strip_schemes() {
        assert_eq!(
            contact_lines(&bundle()),
            vec!["London", "ada@example.com", "github.com/ada"]
        );
    }

    #[test]
    fn jobs_resolve_descriptions_by_key() {
        let bundle = bundle();
        let jobs = jobs(&bundle);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Engines Ltd");
        assert_eq!(jobs[0].description, Some("Wrote the first program."));
    }

    #[test]
    fn certification_line_joins_issuer_and_year() {
        assert_eq!(
            certification_line(&bundle(), 0).as_deref(),
            Some("Numbers - Royal Society (1843)")
        );
        assert_eq!(certification_line(&bundle(), 1), None);
    }
}
