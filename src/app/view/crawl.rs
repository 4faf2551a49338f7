use super::super::messages::Message;
use super::super::state::{
    App, CRAWL_LINE_SPACING, CRAWL_MAX_WIDTH_PX, CRAWL_SCROLL_ID, CRAWL_SIDE_PADDING_PX,
};
use crate::crawl::{BlockKind, CrawlBlock};
use crate::theme::tint_color;
use iced::alignment::Horizontal;
use iced::font::Weight;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::text::{LineHeight, Rich, Span, Wrapping};
use iced::widget::{Column, Space, column, container, scrollable, text};
use iced::{Background, Color, Element, Font, Length};

const INTRO_COLOR: Color = Color {
    r: 0.29,
    g: 0.84,
    b: 0.93,
    a: 1.0,
};

fn sky(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::BLACK)),
        ..container::Style::default()
    }
}

impl App {
    pub(super) fn crawl_view(&self) -> Element<'_, Message> {
        if self.intro.active {
            return self.intro_view();
        }

        let surface = &self.crawl.surface;
        let size = self.crawl_font_size();
        let color = Color {
            a: surface.text_alpha(),
            ..tint_color(self.crawl.document.tint)
        };
        let line_height = LineHeight::Relative(CRAWL_LINE_SPACING);
        let bold = Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        };

        let mut body = Column::new()
            .spacing(size * CRAWL_LINE_SPACING)
            .width(Length::Fill)
            .max_width(CRAWL_MAX_WIDTH_PX);
        for section in &self.crawl.document.sections {
            let mut block_column = Column::new().width(Length::Fill);
            if let Some(title) = &section.title {
                block_column = block_column.push(
                    text(title.clone())
                        .size(size * 1.3)
                        .font(bold)
                        .color(color)
                        .width(Length::Fill)
                        .align_x(Horizontal::Center),
                );
            }
            for block in &section.blocks {
                block_column = block_column.push(crawl_block(block, size, line_height, color, bold));
            }
            body = body.push(block_column);
        }

        let track = column![
            Space::with_height(Length::Fixed(surface.lead_px())),
            container(body)
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding([0.0, CRAWL_SIDE_PADDING_PX]),
            Space::with_height(Length::Fixed(surface.trailing_px)),
        ]
        .width(Length::Fill);

        let crawl = scrollable(track)
            .direction(Direction::Vertical(
                Scrollbar::new().width(0.0).scroller_width(0.0).margin(0.0),
            ))
            .on_scroll(|viewport| Message::CrawlViewport {
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .id(CRAWL_SCROLL_ID.clone())
            .width(Length::Fill)
            .height(Length::Fill);

        container(crawl)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(sky)
            .into()
    }

    fn intro_view(&self) -> Element<'_, Message> {
        let size = self.crawl_font_size() * 1.2;
        container(
            text(self.language.intro_text())
                .size(size)
                .color(INTRO_COLOR)
                .align_x(Horizontal::Center),
        )
        .center(Length::Fill)
        .padding(CRAWL_SIDE_PADDING_PX)
        .style(sky)
        .into()
    }
}

fn crawl_block<'a>(
    block: &'a CrawlBlock,
    size: f32,
    line_height: LineHeight,
    color: Color,
    bold: Font,
) -> Element<'a, Message> {
    let span = |content: String, font: Font, size: f32| -> Span<'a, Message> {
        Span::new(content)
            .font(font)
            .size(size)
            .line_height(line_height)
            .color(color)
    };

    let spans: Vec<Span<'a, Message>> = match block.kind {
        BlockKind::Break => return Space::with_height(Length::Fixed(size)).into(),
        BlockKind::CertificationName => vec![span(block.text.clone(), bold, size)],
        BlockKind::CertificationDetail => vec![span(block.text.clone(), Font::DEFAULT, size * 0.85)],
        BlockKind::Item | BlockKind::Paragraph => {
            let mut spans = Vec::new();
            if block.kind == BlockKind::Item {
                spans.push(span("• ".to_string(), Font::DEFAULT, size));
            }
            if let Some(strong) = &block.strong {
                spans.push(span(strong.clone(), bold, size));
            }
            spans.push(span(block.text.clone(), Font::DEFAULT, size));
            spans
        }
    };

    let align = match block.kind {
        BlockKind::CertificationName | BlockKind::CertificationDetail => Horizontal::Center,
        _ => Horizontal::Left,
    };

    Rich::with_spans(spans)
        .width(Length::Fill)
        .wrapping(Wrapping::Word)
        .align_x(align)
        .into()
}
