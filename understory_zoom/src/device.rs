// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-agent based device classification.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::DeviceClass;

/// Handheld browser families, matched anywhere in the user agent.
const HANDHELD_PATTERN: &str = concat!(
    r"(android|bb\d+|meego).+mobile|avantgo|bada/|blackberry|blazer|compal|elaine|",
    r"fennec|hiptop|iemobile|ip(hone|od)|ipad|iris|kindle|Android|Silk|lge |maemo|midp|",
    r"mmp|netfront|opera m(ob|in)i|palm( os)?|phone|p(ixi|re)/|plucker|pocket|psp|",
    r"series(4|6)0|symbian|treo|up\.(browser|link)|vodafone|wap|windows (ce|phone)|xda|",
    r"xiino",
);

/// Handset vendor and model codes, matched against the first four characters.
const HANDSET_PREFIX_PATTERN: &str = concat!(
    r"1207|6310|6590|3gso|4thp|50[1-6]i|770s|802s|a wa|abac|ac(er|oo|s\-)|ai(ko|rn)|",
    r"al(av|ca|co)|amoi|an(ex|ny|yw)|aptu|ar(ch|go)|as(te|us)|attw|au(di|\-m|r |s )|",
    r"avan|be(ck|ll|nq)|bi(lb|rd)|bl(ac|az)|br(e|v)w|bumb|bw\-(n|u)|c55/|capi|ccwa|",
    r"cdm\-|cell|chtm|cldc|cmd\-|co(mp|nd)|craw|da(it|ll|ng)|dbte|dc\-s|devi|dica|dmob|",
    r"do(c|p)o|ds(12|\-d)|el(49|ai)|em(l2|ul)|er(ic|k0)|esl8|ez([4-7]0|os|wa|ze)|fetc|",
    r"fly(\-|_)|g1 u|g560|gene|gf\-5|g\-mo|go(\.w|od)|gr(ad|un)|haie|hcit|hd\-(m|p|t)|",
    r"hei\-|hi(pt|ta)|hp( i|ip)|hs\-c|ht(c(\-| |_|a|g|p|s|t)|tp)|hu(aw|tc)|",
    r"i\-(20|go|ma)|i230|iac( |\-|/)|ibro|idea|ig01|ikom|im1k|inno|ipaq|iris|ja(t|v)a|",
    r"jbro|jemu|jigs|kddi|keji|kgt( |/)|klon|kpt |kwc\-|kyo(c|k)|le(no|xi)|",
    r"lg( g|/(k|l|u)|50|54|\-[a-w])|libw|lynx|m1\-w|m3ga|m50/|ma(te|ui|xo)|",
    r"mc(01|21|ca)|m\-cr|me(rc|ri)|mi(o8|oa|ts)|mmef|mo(01|02|bi|de|do|t(\-| |o|v)|zz)|",
    r"mt(50|p1|v )|mwbp|mywa|n10[0-2]|n20[2-3]|n30(0|2)|n50(0|2|5)|n7(0(0|1)|10)|",
    r"ne((c|m)\-|on|tf|wf|wg|wt)|nok(6|i)|nzph|o2im|op(ti|wv)|oran|owg1|p800|",
    r"pan(a|d|t)|pdxg|pg(13|\-([1-8]|c))|phil|pire|pl(ay|uc)|pn\-2|po(ck|rt|se)|prox|",
    r"psio|pt\-g|qa\-a|qc(07|12|21|32|60|\-[2-7]|i\-)|qtek|r380|r600|raks|rim9|",
    r"ro(ve|zo)|s55/|sa(ge|ma|mm|ms|ny|va)|sc(01|h\-|oo|p\-)|sdk/|",
    r"se(c(\-|0|1)|47|mc|nd|ri)|sgh\-|shar|sie(\-|m)|sk\-0|sl(45|id)|",
    r"sm(al|ar|b3|it|t5)|so(ft|ny)|sp(01|h\-|v\-|v )|sy(01|mb)|t2(18|50)|t6(00|10|18)|",
    r"ta(gt|lk)|tcl\-|tdg\-|tel(i|m)|tim\-|t\-mo|to(pl|sh)|ts(70|m\-|m3|m5)|tx\-9|",
    r"up(\.b|g1|si)|utst|v400|v750|veri|vi(rg|te)|vk(40|5[0-3]|\-v)|vm40|voda|vulc|",
    r"vx(52|53|60|61|70|80|81|83|85|98)|w3c(\-| )|webc|whit|wi(g |nc|nw)|wmlb|wonu|",
    r"x700|yas\-|your|zeto|zte\-",
);

static HANDHELD: Lazy<Option<Regex>> = Lazy::new(|| case_insensitive(HANDHELD_PATTERN));
static HANDSET_PREFIX: Lazy<Option<Regex>> =
    Lazy::new(|| case_insensitive(HANDSET_PREFIX_PATTERN));

fn case_insensitive(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(err) => {
            log::warn!("device pattern rejected: {err}");
            None
        }
    }
}

/// Classify a browser `User-Agent` string.
///
/// A user agent is compact if it names a handheld browser family anywhere,
/// or if its first four characters are a known handset vendor or model code
/// (for example `SonyEricsson...` or `Nokia...`). Everything else is
/// [`DeviceClass::Regular`].
///
/// Requires the `std` feature.
///
/// ```rust
/// use understory_zoom::{DeviceClass, classify_user_agent};
///
/// let phone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
/// assert_eq!(classify_user_agent(phone), DeviceClass::Compact);
///
/// let desktop = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
/// assert_eq!(classify_user_agent(desktop), DeviceClass::Regular);
/// ```
pub fn classify_user_agent(user_agent: &str) -> DeviceClass {
    let prefix_end = user_agent
        .char_indices()
        .nth(4)
        .map_or(user_agent.len(), |(idx, _)| idx);
    let prefix = &user_agent[..prefix_end];

    let handheld = HANDHELD
        .as_ref()
        .is_some_and(|re| re.is_match(user_agent));
    let handset = HANDSET_PREFIX
        .as_ref()
        .is_some_and(|re| re.is_match(prefix));
    if handheld || handset {
        DeviceClass::Compact
    } else {
        DeviceClass::Regular
    }
}
