use crate::models::{ProfilePatch, SchoolProfile};

/// Ersätt de fält som finns i `patch`. Citatlistan ersätts i sin helhet.
pub fn merge_profile(profile: &SchoolProfile, patch: &ProfilePatch) -> SchoolProfile {
    let ProfilePatch {
        name,
        description,
        address,
        email,
        teacher_name,
        phone,
        greeting,
        quotes,
    } = patch.clone();

    SchoolProfile {
        name: name.unwrap_or_else(|| profile.name.clone()),
        description: description.unwrap_or_else(|| profile.description.clone()),
        address: address.unwrap_or_else(|| profile.address.clone()),
        email: email.unwrap_or_else(|| profile.email.clone()),
        teacher_name: teacher_name.unwrap_or_else(|| profile.teacher_name.clone()),
        phone: phone.unwrap_or_else(|| profile.phone.clone()),
        greeting: greeting.unwrap_or_else(|| profile.greeting.clone()),
        quotes: quotes.unwrap_or_else(|| profile.quotes.clone()),
    }
}
