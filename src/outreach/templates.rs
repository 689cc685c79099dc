//! Built-in message templates and token substitution.

use std::sync::LazyLock;

use crate::models::{MessageTemplate, TemplateCategory, TemplateTone};

static BUILTIN_TEMPLATES: LazyLock<Vec<MessageTemplate>> = LazyLock::new(|| {
    vec![
        MessageTemplate {
            id: "formal-email".to_string(),
            title: "Formal email".to_string(),
            subject: "Support single-stair housing reform in [DISTRICT]".to_string(),
            body: "Dear [REPRESENTATIVE_NAME],\n\n\
                   I am a constituent in [CITY], writing to ask you to support legalizing \
                   single-stair apartment buildings of up to six stories in North Carolina. \
                   Current code requires two staircases in most multifamily buildings, which \
                   rules out the small, light-filled infill buildings [CITY] needs on its \
                   smaller lots.\n\n\
                   Cities and countries that allow single-stair designs pair them with modern \
                   sprinkler and egress standards and maintain strong safety records. For \
                   [DISTRICT], this reform would mean more family-sized homes near jobs and \
                   transit without changing neighborhood scale.\n\n\
                   I urge you to champion single-stair reform in the General Assembly.\n\n\
                   Sincerely,\n\
                   [USER_NAME]\n\
                   [CITY], NC"
                .to_string(),
            category: TemplateCategory::Email,
            tone: TemplateTone::Formal,
        },
        MessageTemplate {
            id: "personal-email".to_string(),
            title: "Personal email".to_string(),
            subject: "From a neighbor in [CITY]".to_string(),
            body: "Hi [REPRESENTATIVE_NAME],\n\n\
                   My name is [USER_NAME] and I live in [CITY]. Like a lot of families in \
                   [DISTRICT], mine is feeling the housing squeeze, and I keep seeing small \
                   apartment projects die because the second-staircase requirement doesn't fit \
                   the lot.\n\n\
                   One fix is simple: let builders use a single stairway in small apartment \
                   buildings, the way Seattle and New York City already do. More homes, same \
                   streets.\n\n\
                   Thanks for reading,\n\
                   [USER_NAME]"
                .to_string(),
            category: TemplateCategory::Email,
            tone: TemplateTone::Personal,
        },
        MessageTemplate {
            id: "formal-letter".to_string(),
            title: "Printed letter".to_string(),
            subject: "Re: Single-stair building reform".to_string(),
            body: "[REPRESENTATIVE_NAME]\n\
                   North Carolina General Assembly\n\
                   16 W Jones St\n\
                   Raleigh, NC 27601\n\n\
                   Dear [REPRESENTATIVE_NAME],\n\n\
                   I write as a resident of [CITY_COUNTY] to ask for your support for \
                   single-stair apartment reform. Households across [CITY_COUNTY] are priced \
                   out of neighborhoods they work in, while buildable lots sit vacant because \
                   the two-staircase rule makes small multifamily buildings impractical.\n\n\
                   Legalizing single-stair buildings up to six stories, with modern fire \
                   protection, would open those lots in [DISTRICT] to the kind of modest, \
                   well-lit apartments found across Europe and in a growing list of American \
                   cities.\n\n\
                   Respectfully,\n\
                   [USER_NAME]\n\
                   [CITY], NC"
                .to_string(),
            category: TemplateCategory::Letter,
            tone: TemplateTone::Formal,
        },
        MessageTemplate {
            id: "phone-script".to_string(),
            title: "Phone call script".to_string(),
            subject: "Phone script: single-stair reform".to_string(),
            body: "Hello, my name is [USER_NAME] and I'm a constituent calling from [CITY].\n\n\
                   I'm calling to ask [REPRESENTATIVE_NAME] to support legalizing single-stair \
                   apartment buildings in North Carolina. The current two-staircase rule blocks \
                   small apartment buildings on the lots [DISTRICT] actually has.\n\n\
                   If asked for specifics: up to six stories, one stairway, modern sprinklers, \
                   as Seattle and New York City already allow.\n\n\
                   Thank you for your time."
                .to_string(),
            category: TemplateCategory::PhoneScript,
            tone: TemplateTone::Urgent,
        },
    ]
});

/// A template with its tokens filled in.
#[derive(Debug, Clone)]
pub struct FormattedMessage {
    pub subject: String,
    pub body: String,
}

/// All built-in templates.
pub fn builtin_templates() -> &'static [MessageTemplate] {
    &BUILTIN_TEMPLATES
}

pub fn template_by_id(id: &str) -> Option<&'static MessageTemplate> {
    BUILTIN_TEMPLATES.iter().find(|t| t.id == id)
}

pub fn templates_by_category(category: TemplateCategory) -> Vec<&'static MessageTemplate> {
    BUILTIN_TEMPLATES
        .iter()
        .filter(|t| t.category == category)
        .collect()
}

/// Fill a template's subject and body.
///
/// Every occurrence of every token is replaced. `[CITY_COUNTY]` renders as
/// "{city} County". Values are injected as-is; output is plain text.
pub fn format_template(
    template: &MessageTemplate,
    user_name: &str,
    rep_name: &str,
    district: &str,
    city: &str,
) -> FormattedMessage {
    FormattedMessage {
        subject: substitute(&template.subject, user_name, rep_name, district, city),
        body: substitute(&template.body, user_name, rep_name, district, city),
    }
}

fn substitute(text: &str, user_name: &str, rep_name: &str, district: &str, city: &str) -> String {
    text.replace("[CITY_COUNTY]", &format!("{city} County"))
        .replace("[USER_NAME]", user_name)
        .replace("[REPRESENTATIVE_NAME]", rep_name)
        .replace("[DISTRICT]", district)
        .replace("[CITY]", city)
}
