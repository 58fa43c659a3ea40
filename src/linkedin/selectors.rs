// src/linkedin/selectors.rs
//! Page locations of each job field, most specific first.
//! The logged-in job view and the public guest view use different markup.

pub const TITLE: &[&str] = &[
    ".job-details-jobs-unified-top-card__job-title h1",
    ".job-details-jobs-unified-top-card__job-title",
    "h1.top-card-layout__title",
    "h1[data-test-id='job-title']",
    ".jobs-unified-top-card__job-title",
];

pub const COMPANY: &[&str] = &[
    ".job-details-jobs-unified-top-card__company-name a",
    ".job-details-jobs-unified-top-card__company-name",
    ".top-card-layout__card .topcard__org-name-link",
    "a[data-test-id='job-poster-name']",
    ".jobs-unified-top-card__company-name",
];

pub const LOCATION: &[&str] = &[
    ".job-details-jobs-unified-top-card__primary-description-container span.tvm__text--low-emphasis",
    ".top-card-layout__card .topcard__flavor--bullet",
    "[data-test-id='job-location']",
    ".jobs-unified-top-card__bullet",
];

pub const DESCRIPTION: &[&str] = &[
    ".jobs-description__content .jobs-box__html-content",
    ".jobs-box__html-content",
    ".jobs-description-content__text",
    ".show-more-less-html__markup",
    "[data-test-id='job-description']",
];

/// Short labels ("Matches your job preferences, workplace type is Remote.")
/// scanned by the normalizer.
pub const PREFERENCE_FRAGMENTS: &[&str] = &[
    ".job-details-preferences-and-skills__pill",
    ".job-details-fit-level-preferences button",
    ".job-details-jobs-unified-top-card__job-insight",
];
