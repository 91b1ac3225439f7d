//! Reward model conversion.
//!
//! Bridges the wire-level [`Reward`] and the flat, string-backed model the
//! edit form binds to. Numeric limits become strings so the form can hold
//! intermediate states ("", partially typed numbers); the write path turns
//! them back into explicit value + enable-flag pairs.
//!
//! None of these functions touch the network or panic on malformed input.
//! [`to_input_reward`] coerces anything it cannot parse into "unset" —
//! callers that want typos surfaced instead use [`to_input_reward_strict`].

use thiserror::Error;

use crate::duration::parse_duration;
use crate::models::{InputReward, Reward, RewardAction, TwitchInputReward};
use crate::registry::RewardActionKind;

/// The editable form model for a reward. All numeric fields are strings
/// holding what the user typed; `cooldown` is a duration expression.
/// Constructed per edit session and discarded after submission.
#[derive(Debug, Clone, PartialEq)]
pub struct VRewardModel {
    pub title: String,
    pub prompt: String,
    pub cost: String,
    pub uses_per_stream: String,
    pub uses_per_user: String,
    pub cooldown: String,
    /// Hex color with `#` prefix, or empty for the Twitch default.
    pub color: String,
    pub image_url: String,
    pub live_delay: String,
    pub auto_accept: bool,
    pub action: RewardAction,
}

/// Errors from the strict write-path conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("Not a duration: {0:?}")]
    InvalidCooldown(String),

    #[error("Not a number for {field}: {value:?}")]
    InvalidLimit { field: &'static str, value: String },
}

/// Project a reward into a fresh form model.
///
/// Disabled limits project to `""`, never to their stale numeric value. An
/// enabled cooldown projects as raw seconds (`"172800"`), not re-formatted
/// as a duration expression — converting back preserves the seconds value,
/// not whatever syntax the broadcaster originally typed.
pub fn to_v_reward_model(reward: &Reward) -> VRewardModel {
    let mut model = default_new_reward();
    assign_to_v_reward_model(reward, &mut model);
    model
}

/// Same projection as [`to_v_reward_model`], writing into an existing model
/// so reactive bindings keep their target. Every field is overwritten; the
/// model gets its own copy of the action.
pub fn assign_to_v_reward_model(reward: &Reward, model: &mut VRewardModel) {
    let twitch = &reward.twitch;

    model.title = twitch.title.clone();
    model.prompt = twitch.prompt.clone();
    model.cost = twitch.cost.to_string();

    let per_stream = &twitch.max_per_stream_setting;
    model.uses_per_stream = if per_stream.is_enabled {
        per_stream.max_per_stream.to_string()
    } else {
        String::new()
    };

    let per_user = &twitch.max_per_user_per_stream_setting;
    model.uses_per_user = if per_user.is_enabled {
        per_user.max_per_user_per_stream.to_string()
    } else {
        String::new()
    };

    let cooldown = &twitch.global_cooldown_setting;
    model.cooldown = if cooldown.is_enabled {
        cooldown.global_cooldown_seconds.to_string()
    } else {
        String::new()
    };

    model.color = twitch.background_color.clone();
    model.image_url = twitch
        .image
        .as_ref()
        .or(twitch.default_image.as_ref())
        .map(|image| image.url_4x.clone())
        .unwrap_or_default();
    model.live_delay = reward.live_delay.clone().unwrap_or_default();
    model.auto_accept = reward.auto_accept;
    model.action = reward.data.clone();
}

/// Build the write payload from a form model. Lenient: every field that does
/// not parse is sent as "unset" with its enable-flag off, so this can never
/// fail — an unparseable cooldown silently disables the cooldown. Prefer
/// [`to_input_reward_strict`] where a typo should block submission instead.
///
/// `is_user_input_required` comes from the registry for the model's current
/// action kind; any stale form toggle is ignored.
pub fn to_input_reward(model: &VRewardModel) -> InputReward {
    let cooldown = parse_duration(&model.cooldown);
    let max_per_stream = parse_limit(&model.uses_per_stream);
    let max_per_user = parse_limit(&model.uses_per_user);

    InputReward {
        twitch: TwitchInputReward {
            title: model.title.clone(),
            cost: model.cost.trim().parse().unwrap_or(0),
            prompt: model.prompt.clone(),
            is_enabled: None,
            background_color: if model.color.is_empty() {
                None
            } else {
                Some(model.color.clone())
            },
            is_user_input_required: model.action.kind().input_required(),
            is_max_per_stream_enabled: max_per_stream.is_some(),
            max_per_stream,
            is_max_per_user_per_stream_enabled: max_per_user.is_some(),
            max_per_user_per_stream: max_per_user,
            is_global_cooldown_enabled: cooldown.is_some(),
            global_cooldown_seconds: cooldown,
            should_redemptions_skip_request_queue: false,
        },
        data: model.action.clone(),
        live_delay: if model.live_delay.is_empty() {
            None
        } else {
            Some(model.live_delay.clone())
        },
        auto_accept: model.auto_accept,
    }
}

/// Like [`to_input_reward`], but a non-empty field that does not parse is an
/// error instead of a silent "unset". Agrees with the lenient form whenever
/// it succeeds.
pub fn to_input_reward_strict(model: &VRewardModel) -> Result<InputReward, ConvertError> {
    if !model.cooldown.is_empty() && parse_duration(&model.cooldown).is_none() {
        return Err(ConvertError::InvalidCooldown(model.cooldown.clone()));
    }
    check_limit("max_per_stream", &model.uses_per_stream)?;
    check_limit("max_per_user_per_stream", &model.uses_per_user)?;

    Ok(to_input_reward(model))
}

/// A limit field: empty, zero or unparseable all mean "no limit".
fn parse_limit(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|n| *n != 0)
}

fn check_limit(field: &'static str, value: &str) -> Result<(), ConvertError> {
    let trimmed = value.trim();
    // "0" is a deliberate "no limit", not a typo.
    if trimmed.is_empty() || trimmed.parse::<u64>().is_ok() {
        Ok(())
    } else {
        Err(ConvertError::InvalidLimit {
            field,
            value: value.to_string(),
        })
    }
}

/// The model a "new reward" dialog starts from: everything empty, a Timeout
/// action with the registry's default payload.
pub fn default_new_reward() -> VRewardModel {
    VRewardModel {
        title: String::new(),
        prompt: String::new(),
        cost: String::new(),
        uses_per_stream: String::new(),
        uses_per_user: String::new(),
        cooldown: String::new(),
        color: String::new(),
        image_url: String::new(),
        live_delay: String::new(),
        auto_accept: false,
        action: RewardActionKind::Timeout.default_action(),
    }
}

/// Reset a model to [`default_new_reward`] in place.
pub fn assign_default_to_model(model: &mut VRewardModel) {
    copy_model(&default_new_reward(), model);
}

/// Overwrite every field of `to` with `from`'s, reusing `to`'s allocations
/// where possible. Used to restore a model after a cancelled or failed edit.
/// `to` ends up owning its own action — models never alias each other.
pub fn copy_model(from: &VRewardModel, to: &mut VRewardModel) {
    to.clone_from(from);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{
        GlobalCooldownSetting, MaxPerStreamSetting, MaxPerUserPerStreamSetting, TimeoutAction,
        TwitchReward, TwitchRewardImage,
    };

    fn sample_reward() -> Reward {
        Reward {
            twitch: TwitchReward {
                broadcaster_id: "27620241".to_string(),
                broadcaster_login: "streamer".to_string(),
                broadcaster_name: "Streamer".to_string(),
                id: "92af127c-7326-4483-a52b-b0da0be61c01".to_string(),
                title: "Timeout yourself".to_string(),
                prompt: "Take a break".to_string(),
                cost: 500,
                image: None,
                default_image: None,
                background_color: "#00E5CB".to_string(),
                is_enabled: true,
                is_user_input_required: true,
                max_per_stream_setting: MaxPerStreamSetting {
                    is_enabled: true,
                    max_per_stream: 10,
                },
                max_per_user_per_stream_setting: MaxPerUserPerStreamSetting {
                    is_enabled: false,
                    max_per_user_per_stream: 3,
                },
                global_cooldown_setting: GlobalCooldownSetting {
                    is_enabled: true,
                    global_cooldown_seconds: 172800,
                },
                is_paused: false,
                is_in_stock: true,
                should_redemptions_skip_request_queue: false,
                redemptions_redeemed_current_stream: None,
                cooldown_expires_at: None,
            },
            data: RewardAction::Timeout(TimeoutAction {
                duration: "1s".to_string(),
                vip: false,
            }),
            live_delay: Some("5s".to_string()),
            auto_accept: true,
        }
    }

    #[test]
    fn test_to_v_reward_model_projection() {
        let model = to_v_reward_model(&sample_reward());

        assert_eq!(model.title, "Timeout yourself");
        assert_eq!(model.prompt, "Take a break");
        assert_eq!(model.cost, "500");
        assert_eq!(model.uses_per_stream, "10");
        // Disabled limit projects empty, not "3".
        assert_eq!(model.uses_per_user, "");
        // Cooldown projects as raw seconds, not "2d".
        assert_eq!(model.cooldown, "172800");
        assert_eq!(model.color, "#00E5CB");
        assert_eq!(model.live_delay, "5s");
        assert!(model.auto_accept);
        assert_eq!(model.action.kind(), RewardActionKind::Timeout);
    }

    #[test]
    fn test_model_action_is_independent_copy() {
        let reward = sample_reward();
        let mut model = to_v_reward_model(&reward);

        model.action = RewardActionKind::SpotifySkip.default_action();
        assert_eq!(reward.data.kind(), RewardActionKind::Timeout);
    }

    #[test]
    fn test_image_url_prefers_uploaded_image() {
        let mut reward = sample_reward();
        reward.twitch.default_image = Some(TwitchRewardImage {
            url_1x: "d1".to_string(),
            url_2x: "d2".to_string(),
            url_4x: "d4".to_string(),
        });

        assert_eq!(to_v_reward_model(&reward).image_url, "d4");

        reward.twitch.image = Some(TwitchRewardImage {
            url_1x: "u1".to_string(),
            url_2x: "u2".to_string(),
            url_4x: "u4".to_string(),
        });

        assert_eq!(to_v_reward_model(&reward).image_url, "u4");
    }

    #[test]
    fn test_to_input_reward_scenario() {
        let model = VRewardModel {
            cooldown: "2d".to_string(),
            uses_per_stream: String::new(),
            ..to_v_reward_model(&sample_reward())
        };

        let input = to_input_reward(&model);

        assert_eq!(input.twitch.global_cooldown_seconds, Some(172800));
        assert!(input.twitch.is_global_cooldown_enabled);
        assert!(!input.twitch.is_max_per_stream_enabled);
        assert_eq!(input.twitch.max_per_stream, None);
        assert!(input.twitch.is_user_input_required);
        assert!(!input.twitch.should_redemptions_skip_request_queue);
    }

    #[test]
    fn test_round_trip_preserves_cooldown_seconds() {
        let reward = sample_reward();
        let input = to_input_reward(&to_v_reward_model(&reward));

        assert_eq!(input.twitch.title, reward.twitch.title);
        assert_eq!(input.twitch.prompt, reward.twitch.prompt);
        assert_eq!(input.twitch.background_color.as_deref(), Some("#00E5CB"));
        assert_eq!(input.data.kind(), reward.data.kind());
        assert_eq!(
            input.twitch.global_cooldown_seconds,
            Some(reward.twitch.global_cooldown_setting.global_cooldown_seconds)
        );
    }

    #[test]
    fn test_unparseable_cooldown_coerces_to_disabled() {
        let model = VRewardModel {
            cooldown: "soon".to_string(),
            ..default_new_reward()
        };

        let input = to_input_reward(&model);

        assert!(!input.twitch.is_global_cooldown_enabled);
        assert_eq!(input.twitch.global_cooldown_seconds, None);
    }

    #[test]
    fn test_zero_and_garbage_limits_mean_unset() {
        for value in ["", "0", "many"] {
            let model = VRewardModel {
                uses_per_stream: value.to_string(),
                ..default_new_reward()
            };

            let input = to_input_reward(&model);
            assert!(!input.twitch.is_max_per_stream_enabled, "value {:?}", value);
            assert_eq!(input.twitch.max_per_stream, None, "value {:?}", value);
        }
    }

    #[test]
    fn test_input_required_comes_from_registry() {
        // Timeout requires viewer input no matter what the form once showed.
        let model = default_new_reward();
        assert!(to_input_reward(&model).twitch.is_user_input_required);

        let model = VRewardModel {
            action: RewardActionKind::SubOnly.default_action(),
            ..default_new_reward()
        };
        assert!(!to_input_reward(&model).twitch.is_user_input_required);
    }

    #[test]
    fn test_strict_rejects_cooldown_typo() {
        let model = VRewardModel {
            cooldown: "2dd".to_string(),
            ..default_new_reward()
        };

        assert_eq!(
            to_input_reward_strict(&model),
            Err(ConvertError::InvalidCooldown("2dd".to_string()))
        );
    }

    #[test]
    fn test_strict_rejects_limit_typo() {
        let model = VRewardModel {
            uses_per_user: "ten".to_string(),
            ..default_new_reward()
        };

        assert_eq!(
            to_input_reward_strict(&model),
            Err(ConvertError::InvalidLimit {
                field: "max_per_user_per_stream",
                value: "ten".to_string(),
            })
        );
    }

    #[test]
    fn test_strict_agrees_with_lenient_on_valid_input() {
        let model = VRewardModel {
            cooldown: "90".to_string(),
            uses_per_stream: "5".to_string(),
            uses_per_user: "0".to_string(),
            ..to_v_reward_model(&sample_reward())
        };

        assert_eq!(to_input_reward_strict(&model), Ok(to_input_reward(&model)));
    }

    #[test]
    fn test_assign_default_to_model() {
        let mut model = to_v_reward_model(&sample_reward());
        assign_default_to_model(&mut model);

        assert_eq!(model, default_new_reward());
    }

    #[test]
    fn test_copy_model_copies_every_field() {
        let source = to_v_reward_model(&sample_reward());
        let mut target = default_new_reward();

        copy_model(&source, &mut target);

        assert_eq!(target, source);
        assert_eq!(target.action, source.action);
    }

    #[test]
    fn test_copied_model_does_not_alias() {
        let source = to_v_reward_model(&sample_reward());
        let mut target = default_new_reward();
        copy_model(&source, &mut target);

        target.action = RewardActionKind::SpotifySkip.default_action();
        assert_eq!(source.action.kind(), RewardActionKind::Timeout);
    }

    #[test]
    fn test_assign_overwrites_existing_model() {
        let mut model = VRewardModel {
            title: "stale".to_string(),
            cooldown: "999".to_string(),
            ..default_new_reward()
        };

        assign_to_v_reward_model(&sample_reward(), &mut model);

        assert_eq!(model, to_v_reward_model(&sample_reward()));
    }
}
