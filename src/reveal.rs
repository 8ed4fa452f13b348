//! Staggered reveal of the page content once the intro video ends.

use crate::{
    animation::timeline::{Lerp, Timeline, Tween},
    config::RevealConfig,
    foundation::error::IntroResult,
};

/// Pose of one content element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in CSS pixels; positive is down.
    pub y_offset: f64,
    /// Uniform scale.
    pub scale: f64,
}

impl VisualState {
    /// Fully visible, in place, unscaled.
    pub const RESTING: Self = Self {
        opacity: 1.0,
        y_offset: 0.0,
        scale: 1.0,
    };
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            y_offset: f64::lerp(&a.y_offset, &b.y_offset, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
        }
    }
}

/// Which content element a tween drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentRole {
    /// Main heading.
    Heading,
    /// Tagline under the heading.
    Tagline,
    /// Call-to-action button.
    CallToAction,
}

impl ContentRole {
    /// All roles in document order.
    pub const ALL: [Self; 3] = [Self::Heading, Self::Tagline, Self::CallToAction];
}

/// One animated element inside the content region.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ContentElement {
    /// What the element is.
    pub role: ContentRole,
    /// Current pose.
    pub state: VisualState,
}

/// The overlay holding the page content. Starts hidden.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ContentRegion {
    /// Visibility flag of the container.
    pub visible: bool,
    /// Container opacity.
    pub opacity: f64,
    /// Elements in document order.
    pub elements: Vec<ContentElement>,
}

impl ContentRegion {
    /// Hidden region whose elements all rest in `hidden`.
    pub fn hidden(hidden: VisualState) -> Self {
        Self {
            visible: false,
            opacity: 0.0,
            elements: ContentRole::ALL
                .into_iter()
                .map(|role| ContentElement {
                    role,
                    state: hidden,
                })
                .collect(),
        }
    }

    /// Element with `role`.
    pub fn element(&self, role: ContentRole) -> Option<&ContentElement> {
        self.elements.iter().find(|e| e.role == role)
    }
}

/// One-shot staggered transition from the hidden pose to [`VisualState::RESTING`].
#[derive(Clone, Debug)]
pub struct RevealTransition {
    timeline: Timeline<ContentRole, VisualState>,
    container: Option<Tween<f64>>,
    started_at: Option<f64>,
}

impl RevealTransition {
    /// Schedule one tween per configured step.
    pub fn new(cfg: &RevealConfig) -> IntroResult<Self> {
        let mut timeline = Timeline::new();
        for step in &cfg.steps {
            timeline.add(
                step.role,
                Tween {
                    from: cfg.hidden,
                    to: VisualState::RESTING,
                    duration: step.duration,
                    ease: step.ease,
                },
                step.position,
            )?;
        }
        let container = cfg
            .container_fade
            .as_ref()
            .filter(|f| f.duration > 0.0)
            .map(|f| Tween {
                from: 0.0,
                to: 1.0,
                duration: f.duration,
                ease: f.ease,
            });
        Ok(Self {
            timeline,
            container,
            started_at: None,
        })
    }

    /// Show `region` and start the animation at `now`.
    ///
    /// Only the first call has an effect; it returns `true`. Later calls return `false`.
    pub fn reveal(&mut self, region: &mut ContentRegion, now: f64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        region.visible = true;
        self.tick(region, now);
        tracing::info!(duration = self.timeline.duration(), "content reveal started");
        true
    }

    /// `true` once [`Self::reveal`] has run.
    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Apply the animation state at `now` to `region`. No-op before the reveal starts.
    pub fn tick(&self, region: &mut ContentRegion, now: f64) {
        let Some(start) = self.started_at else {
            return;
        };
        let t = now - start;
        region.opacity = self.container.as_ref().map_or(1.0, |fade| fade.sample(t));
        for el in &mut region.elements {
            if let Some(state) = self.timeline.sample(el.role, t) {
                el.state = state;
            }
        }
    }

    /// `true` once every tween, container fade included, has finished at `now`.
    pub fn is_complete(&self, now: f64) -> bool {
        self.started_at.is_some_and(|start| {
            let t = now - start;
            self.timeline.is_complete(t)
                && self.container.as_ref().is_none_or(|fade| t >= fade.duration)
        })
    }

    /// Timeline-relative start of `role`'s tween.
    pub fn start_of(&self, role: ContentRole) -> Option<f64> {
        self.timeline.start_of(role)
    }

    /// Timeline-relative end of `role`'s tween.
    pub fn end_of(&self, role: ContentRole) -> Option<f64> {
        self.timeline.end_of(role)
    }
}

#[cfg(test)]
#[path = "../tests/unit/reveal.rs"]
mod tests;
