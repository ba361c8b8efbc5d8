//! Built-in content and scene layout of the landing page.
//!
//! Element boxes use a nominal 900px viewport layout; hosts move them with
//! [`crate::ScrollScene::set_element_box`] after measuring the real page.

use std::f64::consts::PI;

use crate::animation::binding::{Binding, BindingTable};
use crate::animation::ease::Ease;
use crate::animation::timeline::{Position, Timeline, TimelineStep};
use crate::animation::value::{ClipInset, Property};
use crate::eval::selector::StepSequence;
use crate::eval::steps::{StateStyle, StepStyles};
use crate::foundation::core::TargetId;
use crate::foundation::error::ScrublineResult;
use crate::scene::clip::{ClipAction, ToggleActions};
use crate::scene::config::{SceneConfig, Tuning};
use crate::scene::region::{RegionSpec, StepSetSpec};
use crate::scroll::source::EdgeEvent;
use crate::scroll::trigger::TriggerRegion;

pub const NOMINAL_VIEWPORT: f64 = 900.0;
pub const NOMINAL_DOCUMENT: f64 = 9000.0;

pub const TIMELINE_RADIUS: f64 = 350.0;
pub const AVATAR_RING_RADIUS: f64 = 48.0;

pub const PROCESS_HEADINGS: [&str; 3] = ["process-heading-1", "process-heading-2", "process-heading-3"];
pub const HERO_AVATARS: [&str; 4] = ["hero-avatar-1", "hero-avatar-2", "hero-avatar-3", "hero-avatar-4"];

/// Stroke length of a circle of `radius`; a dash offset of this much hides the stroke.
pub fn circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

/// Stroke dash offset that draws `p` of the circle.
pub fn stroke_offset(radius: f64, p: f64) -> f64 {
    circumference(radius) * (1.0 - p.clamp(0.0, 1.0))
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Topic {
    pub title: &'static str,
    pub description: &'static str,
}

/// The five steps of the circular process timeline, clockwise from the top.
pub fn process_topics() -> ScrublineResult<StepSequence<Topic>> {
    StepSequence::evenly_spaced([
        Topic {
            title: "Introductory Call",
            description: "We start with a comprehensive consultation to understand your goals, challenges, and vision for the project.",
        },
        Topic {
            title: "Onboarding",
            description: "Complete project setup, team introductions, and establishing clear communication channels and workflows.",
        },
        Topic {
            title: "Project Sessions",
            description: "Regular working sessions where we collaborate closely to build, iterate, and refine your solution.",
        },
        Topic {
            title: "Ongoing Support",
            description: "Continuous assistance, maintenance, and optimization to ensure your project runs smoothly.",
        },
        Topic {
            title: "Performance Iteration",
            description: "Data-driven improvements and feature enhancements based on real-world usage and feedback.",
        },
    ])
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub quote: &'static str,
    pub color: &'static str,
    /// Entrance duration and avatar ring sweep time.
    pub duration_secs: f64,
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            name: "Sarah Johnson",
            quote: "Rodexco changed my entire workflow for the better. Seriously, my opportunities have quadrupled and my stress is a fraction of what it was. I feel taken care of, and that means SO much.",
            color: "#F97316",
            duration_secs: 0.9,
        },
        Testimonial {
            name: "Alex Chen",
            quote: "The platform is incredibly intuitive and the results speak for themselves. My revenue has increased by 300% since I started using Rodexco. It's like having a personal growth coach.",
            color: "#8B5CF6",
            duration_secs: 0.8,
        },
        Testimonial {
            name: "Mars Rodriguez",
            quote: "I was skeptical at first, but Rodexco has completely transformed how I approach content creation. The community support and tools are game-changing. Highly recommend!",
            color: "#22C55E",
            duration_secs: 1.0,
        },
    ]
}

fn rise_in(target: &str, from_y: f64, secs: f64, ease: Ease) -> [TimelineStep; 3] {
    [
        TimelineStep::new(target, Property::Opacity, 0.0, 1.0, secs).ease(ease),
        TimelineStep::new(target, Property::TranslateY, from_y, 0.0, secs).ease(ease),
        TimelineStep::new(
            target,
            Property::ClipPath,
            ClipInset::closed_from_bottom(),
            ClipInset::open(),
            secs,
        )
        .ease(ease),
    ]
}

/// Hero entrance played once the landing sequence is ready.
pub fn hero_entrance() -> ScrublineResult<Timeline> {
    let back = Ease::BackOut {
        overshoot: Ease::BACK_OUT_DEFAULT,
    };
    let avatar = [
        TimelineStep::new("", Property::Opacity, 0.0, 1.0, 0.6).ease(back),
        TimelineStep::new("", Property::Scale, 0.5, 1.0, 0.6).ease(back),
    ];
    Timeline::builder()
        .push_all(rise_in("hero-left", 120.0, 1.2, Ease::OutQuart), Position::After)
        .push_all(
            rise_in("hero-right", 120.0, 1.2, Ease::OutQuart),
            Position::Overlap(0.8),
        )
        .push_all(
            rise_in("hero-paragraph", 120.0, 1.2, Ease::OutQuart),
            Position::Overlap(0.6),
        )
        .push_all(
            [
                TimelineStep::new("hero-button", Property::Opacity, 0.0, 1.0, 0.8).ease(back),
                TimelineStep::new("hero-button", Property::TranslateY, 40.0, 0.0, 0.8).ease(back),
                TimelineStep::new("hero-button", Property::Scale, 0.8, 1.0, 0.8).ease(back),
            ],
            Position::Overlap(0.4),
        )
        .stagger_all(HERO_AVATARS, &avatar, 0.1, Position::Overlap(0.2))
        .build()
}

/// Entrance of the testimonial card for `t`.
pub fn testimonial_entrance(t: &Testimonial) -> ScrublineResult<Timeline> {
    let d = t.duration_secs;
    let card = |target: &str, secs: f64| {
        [
            TimelineStep::new(target, Property::Opacity, 0.0, 1.0, secs).ease(Ease::OutQuart),
            TimelineStep::new(target, Property::TranslateY, 30.0, 0.0, secs).ease(Ease::OutQuart),
        ]
    };
    Timeline::builder()
        .push_all(card("testimonial-card", d), Position::After)
        .push_all(card("testimonial-quote", d), Position::Overlap(0.4))
        .push_all(
            card("testimonial-name", (d - 0.2).max(0.5)),
            Position::Overlap(0.6),
        )
        .push_all(card("testimonial-image", d), Position::Overlap(0.4))
        .build()
}

/// Progress ring around the avatar of testimonial `index`: drawn full, then unwinding.
pub fn testimonial_ring(index: usize, t: &Testimonial) -> ScrublineResult<Timeline> {
    let c = circumference(AVATAR_RING_RADIUS);
    Timeline::builder()
        .push(
            TimelineStep::new(
                format!("testimonial-ring-{}", index + 1),
                Property::StrokeDashOffset,
                0.0,
                c,
                t.duration_secs,
            ),
            Position::After,
        )
        .build()
}

/// Cue reached once the outgoing testimonial has faded; hosts swap the shown content there.
pub const SWAP_CUE: &str = "swap";

const SWAP_OUT_SECS: f64 = 0.4;

/// Switch from testimonial `from` to `to`: the text fades out, the content swaps, then fades
/// back in while the chosen avatar is emphasized and its ring sweeps.
///
/// Other rings are held hidden for the length of the fade, which also stops any sweep still in
/// flight from an earlier switch.
pub fn testimonial_switch(
    people: &[Testimonial],
    from: usize,
    to: usize,
) -> ScrublineResult<Timeline> {
    let c = circumference(AVATAR_RING_RADIUS);
    let back = Ease::BackOut {
        overshoot: Ease::BACK_OUT_DEFAULT,
    };
    let sweep = people.get(to).map_or(1.0, |t| t.duration_secs);
    let text = ["testimonial-quote", "testimonial-name", "testimonial-image"];
    let mut tl = Timeline::builder();
    for (i, target) in text.iter().enumerate() {
        let position = if i == 0 {
            Position::At(0.0)
        } else {
            Position::WithPrevious
        };
        tl = tl.push_all(
            [
                TimelineStep::new(*target, Property::Opacity, 1.0, 0.0, SWAP_OUT_SECS)
                    .ease(Ease::InCubic),
                TimelineStep::new(*target, Property::TranslateY, 0.0, -20.0, SWAP_OUT_SECS)
                    .ease(Ease::InCubic),
            ],
            position,
        );
    }
    tl = tl.call(SWAP_CUE, Position::At(SWAP_OUT_SECS));
    for (i, target) in text.iter().enumerate() {
        let position = if i == 0 {
            Position::At(SWAP_OUT_SECS)
        } else {
            Position::WithPrevious
        };
        tl = tl.push_all(
            [
                TimelineStep::new(*target, Property::Opacity, 0.0, 1.0, 0.6).ease(Ease::OutQuart),
                TimelineStep::new(*target, Property::TranslateY, -20.0, 0.0, 0.6)
                    .ease(Ease::OutQuart),
            ],
            position,
        );
    }

    for i in 0..people.len() {
        let avatar = format!("testimonial-avatar-{}", i + 1);
        let (rest_scale, rest_opacity) = if i == from { (1.1, 1.0) } else { (1.0, 0.8) };
        let (scale, opacity, secs, ease) = if i == to {
            (1.1, 1.0, 0.4, back)
        } else {
            (1.0, 0.8, 0.3, Ease::OutCubic)
        };
        tl = tl
            .push_all(
                [
                    TimelineStep::new(avatar.as_str(), Property::Scale, rest_scale, 0.8, 0.3)
                        .ease(Ease::InCubic),
                    TimelineStep::new(avatar.as_str(), Property::Opacity, rest_opacity, 0.6, 0.3)
                        .ease(Ease::InCubic),
                ],
                Position::At(0.0),
            )
            .push_all(
                [
                    TimelineStep::new(avatar.as_str(), Property::Scale, 0.8, scale, secs).ease(ease),
                    TimelineStep::new(avatar.as_str(), Property::Opacity, 0.6, opacity, secs)
                        .ease(ease),
                ],
                Position::At(0.3),
            );

        let ring = format!("testimonial-ring-{}", i + 1);
        tl = tl.push(
            TimelineStep::hold(ring.as_str(), Property::StrokeDashOffset, c, SWAP_OUT_SECS),
            Position::At(0.0),
        );
        if i == to {
            tl = tl.push(
                TimelineStep::new(ring, Property::StrokeDashOffset, 0.0, c, sweep),
                Position::At(SWAP_OUT_SECS),
            );
        }
    }
    tl.build()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub fn faq_entries() -> Vec<Faq> {
    vec![
        Faq {
            question: "How does Rodexco work?",
            answer: "Rodexco partners with creators to align brand opportunities, growth strategy, and monetization. We handle outreach, negotiation, and long-term partnership development so you can stay focused on creating.",
        },
        Faq {
            question: "What kinds of creators do you typically represent?",
            answer: "We work with video-first creators across YouTube, TikTok, Twitch, and Shorts/Reels who have strong audience trust and consistent content output.",
        },
        Faq {
            question: "What makes Rodexco different?",
            answer: "We focus on sustainable, long-term value. Beyond one-off brand deals, we help creators build repeatable revenue, product lines, and scalable systems.",
        },
        Faq {
            question: "What is Rodexco Ventures?",
            answer: "A co-building arm where we incubate products with creators, combining your audience insight with our product, GTM, and operational expertise.",
        },
        Faq {
            question: "How can I get started?",
            answer: "Submit your application and we\u{2019}ll reach out if there\u{2019}s a strong fit. From there, we\u{2019}ll align on goals and begin onboarding.",
        },
    ]
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ServiceCard {
    pub tag: &'static str,
    pub heading: &'static str,
    pub sub: &'static str,
}

pub fn service_cards() -> Vec<ServiceCard> {
    vec![
        ServiceCard {
            tag: "Brand Partnerships",
            heading: "We craft strategic partnerships to grow earnings and reach by leveraging the right datapoints and network.",
            sub: "We\u{2019}re here to simplify the complexity, guiding you with insights to help your business thrive.",
        },
        ServiceCard {
            tag: "Business Development",
            heading: "We help you to review your entire business structure, identifying the most meaningful opportunities to increase.",
            sub: "We\u{2019}re here to simplify the complexity, guiding you with strategic insights and hands-on support to help your business thrive.",
        },
        ServiceCard {
            tag: "Growth Strategy",
            heading: "We connect clients, capital and systems so you can launch and scale new ventures faster and more confidently.",
            sub: "We turn signals into plans so you can execute with clarity.",
        },
    ]
}

/// Scroll-away of one hero line. Values hold until progress 0.1, then jump onto the scroll curve.
fn pop_away(target: &str, depth: f64, fade: f64) -> [Binding; 6] {
    let y = 100.0 * depth;
    [
        Binding::new(target, Property::TranslateY, 0.0, 0.0).range(0.0, 0.1),
        Binding::new(target, Property::TranslateY, 0.1 * y, y).range(0.1, 1.0),
        Binding::new(target, Property::ClipPath, ClipInset::open(), ClipInset::open())
            .range(0.0, 0.1),
        Binding::new(
            target,
            Property::ClipPath,
            ClipInset::new(0.1 * y, 0.0, 0.0, 0.0),
            ClipInset::new(y, 0.0, 0.0, 0.0),
        )
        .range(0.1, 1.0),
        Binding::new(target, Property::Opacity, 1.0, 1.0).range(0.0, 0.1),
        Binding::new(target, Property::Opacity, 1.0 - 0.1 * fade, 1.0 - fade).range(0.1, 1.0),
    ]
}

/// Hero scroll-away region. Mounted once the hero entrance has started, so its resting values do
/// not reveal the hero early.
pub fn hero_region() -> ScrublineResult<RegionSpec> {
    let bindings = BindingTable::builder()
        .extend(pop_away("hero-left", 1.0, 0.3))
        .extend(pop_away("hero-right", 1.0, 0.3))
        .extend(pop_away("hero-paragraph", 0.8, 0.4))
        .build()?;
    Ok(
        RegionSpec::new("hero", TriggerRegion::parse("top top", "bottom top")?)
            .element(0.0, NOMINAL_VIEWPORT)
            .bindings(bindings)
            .scrub(2.5),
    )
}

/// One region per process heading: each rises out of the ground as it scrolls through view.
pub fn process_heading_regions() -> ScrublineResult<Vec<RegionSpec>> {
    PROCESS_HEADINGS
        .iter()
        .enumerate()
        .map(|(i, &heading)| -> ScrublineResult<RegionSpec> {
            let bindings = BindingTable::builder()
                .bind(Binding::new(heading, Property::Opacity, 0.0, 1.0).ease(Ease::OutQuart))
                .bind(Binding::new(heading, Property::TranslateY, 100.0, 0.0).ease(Ease::OutQuart))
                .bind(
                    Binding::new(
                        heading,
                        Property::ClipPath,
                        ClipInset::closed_from_bottom(),
                        ClipInset::open(),
                    )
                    .ease(Ease::OutQuart),
                )
                .build()?;
            Ok(RegionSpec::new(
                heading,
                TriggerRegion::parse("top bottom", "bottom top")?,
            )
            .element(1400.0 + 160.0 * i as f64, 120.0)
            .bindings(bindings)
            .scrub(0.5))
        })
        .collect()
}

/// Topic descriptions fade and grow in under their titles.
fn description_styles() -> StepStyles {
    let style = |secs: f64, opacity: f64, y: f64, scale: f64| {
        StateStyle::new(secs, Ease::OutCubic)
            .with(Property::Opacity, opacity)
            .with(Property::TranslateY, y)
            .with(Property::Scale, scale)
    };
    StepStyles {
        completed: style(0.3, 0.3, 0.0, 1.0),
        active: style(0.6, 1.0, 0.0, 1.0),
        pending: style(0.3, 0.0, 60.0, 0.8),
    }
}

/// Center model and gradient glow shown while the circular timeline is in view.
fn circle_backdrop() -> ScrublineResult<Timeline> {
    let back = Ease::BackOut {
        overshoot: Ease::BACK_OUT_DEFAULT,
    };
    Timeline::builder()
        .push_all(
            [
                TimelineStep::new("timeline-center-model", Property::Opacity, 0.0, 1.0, 1.5)
                    .ease(back),
                TimelineStep::new("timeline-center-model", Property::Scale, 0.3, 1.0, 1.5)
                    .ease(back),
                TimelineStep::new("timeline-center-model", Property::RotationY, 180.0, 0.0, 1.5)
                    .ease(back),
                TimelineStep::new("timeline-gradient-1", Property::Opacity, 0.0, 0.6, 1.5)
                    .ease(Ease::OutCubic),
                TimelineStep::new("timeline-gradient-2", Property::Opacity, 0.0, 0.4, 1.5)
                    .ease(Ease::OutCubic),
            ],
            Position::At(0.0),
        )
        .build()
}

/// Circular process timeline: the ring draws with progress, gradients turn, topics and their
/// descriptions step through, and the backdrop plays in on entry.
pub fn circular_timeline_region() -> ScrublineResult<RegionSpec> {
    let c = circumference(TIMELINE_RADIUS);
    let bindings = BindingTable::builder()
        .bind(Binding::new("timeline-circle", Property::StrokeDashOffset, c, 0.0))
        .bind(Binding::new("timeline-gradient-1", Property::Rotation, 0.0, 180.0))
        .bind(Binding::new("timeline-gradient-1", Property::Scale, 1.2, 1.5))
        .bind(Binding::new("timeline-gradient-2", Property::Rotation, 45.0, -315.0))
        .bind(Binding::new("timeline-gradient-2", Property::Scale, 1.5, 1.0))
        .build()?;
    let n = process_topics()?.len();
    let named = |prefix: &str| -> Vec<TargetId> {
        (1..=n).map(|i| TargetId::new(format!("{prefix}-{i}"))).collect()
    };
    // Any exit or re-entry snaps the backdrop back; only a fresh entry plays it.
    let backdrop_actions = ToggleActions {
        on_enter: ClipAction::Play,
        on_leave: ClipAction::Reset,
        on_enter_back: ClipAction::Reset,
        on_leave_back: ClipAction::Reset,
    };
    Ok(
        RegionSpec::new("circular-timeline", TriggerRegion::parse("top 20%", "bottom bottom")?)
            .element(3200.0, 2700.0)
            .bindings(bindings)
            .scrub(1.0)
            .steps(StepSetSpec::new(named("topic")).markers(named("dot")))
            .steps(StepSetSpec::new(named("topic-description")).styles(description_styles()))
            .reset_steps_on([EdgeEvent::Leave, EdgeEvent::EnterBack, EdgeEvent::LeaveBack])
            .clip(circle_backdrop()?, backdrop_actions),
    )
}

/// "PARTNERS" then "WORDS" rising out of the ground, played on entry and reversed when
/// scrolled back above.
pub fn partners_words_region() -> ScrublineResult<RegionSpec> {
    let timeline = Timeline::builder()
        .push_all(
            rise_in("partners-word", 100.0, 1.2, Ease::OutQuart),
            Position::At(0.0),
        )
        .push_all(
            rise_in("words-word", 100.0, 1.2, Ease::OutQuart),
            Position::At(0.3),
        )
        .build()?;
    Ok(
        RegionSpec::new("partners-words", TriggerRegion::parse("top 80%", "bottom 20%")?)
            .element(6400.0, 400.0)
            .clip(timeline, ToggleActions::PLAY_REVERSE),
    )
}

/// Whole-document progress; drives the model choreography.
pub fn page_region() -> RegionSpec {
    RegionSpec::new("page", TriggerRegion::document())
}

/// The page's scroll-driven regions, mounted at startup. The hero region is mounted later.
pub fn landing_page() -> ScrublineResult<SceneConfig> {
    let mut regions = vec![page_region()];
    regions.extend(process_heading_regions()?);
    regions.push(circular_timeline_region()?);
    regions.push(partners_words_region()?);
    let cfg = SceneConfig {
        version: Some("1".to_owned()),
        tuning: Tuning::default(),
        regions,
    };
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;
