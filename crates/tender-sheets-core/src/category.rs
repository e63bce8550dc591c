//! Construction-work categories
//!
//! The list is fixed and ordered. Classification walks it top to bottom and
//! the first category with a matching keyword wins, so narrower categories
//! (excavation support, dewatering, piling) are declared before the broad
//! ones they overlap with (earthworks, monolithic works).

use std::fmt;

/// A construction-work category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    TemporaryFacilities,
    ExcavationSupport,
    Dewatering,
    Piling,
    Earthworks,
    MonolithicWorks,
    Waterproofing,
    Masonry,
    Roofing,
    Facade,
    Windows,
    SiteImprovements,
    /// Catch-all when no keyword matches
    GeneralConstruction,
}

impl Category {
    /// Every category, in classification order
    pub const ALL: [Category; 13] = [
        Category::TemporaryFacilities,
        Category::ExcavationSupport,
        Category::Dewatering,
        Category::Piling,
        Category::Earthworks,
        Category::MonolithicWorks,
        Category::Waterproofing,
        Category::Masonry,
        Category::Roofing,
        Category::Facade,
        Category::Windows,
        Category::SiteImprovements,
        Category::GeneralConstruction,
    ];

    /// English display name
    pub fn name(self) -> &'static str {
        match self {
            Category::TemporaryFacilities => "Temporary facilities",
            Category::ExcavationSupport => "Excavation support",
            Category::Dewatering => "Dewatering",
            Category::Piling => "Piling",
            Category::Earthworks => "Earthworks",
            Category::MonolithicWorks => "Monolithic works",
            Category::Waterproofing => "Waterproofing & insulation",
            Category::Masonry => "Masonry & partitions",
            Category::Roofing => "Roofing",
            Category::Facade => "Facade",
            Category::Windows => "Windows & glazing",
            Category::SiteImprovements => "Site improvements",
            Category::GeneralConstruction => "General construction works",
        }
    }

    /// Russian display name
    pub fn name_ru(self) -> &'static str {
        match self {
            Category::TemporaryFacilities => "ВЗиС",
            Category::ExcavationSupport => "Ограждение котлована",
            Category::Dewatering => "Водопонижение",
            Category::Piling => "Свайные работы",
            Category::Earthworks => "Земляные работы",
            Category::MonolithicWorks => "Монолитные работы",
            Category::Waterproofing => "Гидроизоляция/Утепление",
            Category::Masonry => "Кладка/Перегородки",
            Category::Roofing => "Кровля",
            Category::Facade => "Фасад",
            Category::Windows => "Окна/Витражи",
            Category::SiteImprovements => "Благоустройство",
            Category::GeneralConstruction => "Общестроительные работы",
        }
    }

    /// Lowercase keyword substrings that select this category
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::TemporaryFacilities => &[
                "временн",
                "мобилизац",
                "бытовк",
                "ограждение стройплощадки",
                "вахтовый городок",
                "охрана",
                "temporary",
                "mobilization",
                "site establishment",
            ],
            Category::ExcavationSupport => &[
                "ограждение котлована",
                "шпунт",
                "стенки котлована",
                "стена в грунте",
                "буросекущ",
                "распорн",
                "анкерное крепление",
                "sheet pile",
                "shoring",
            ],
            Category::Dewatering => &[
                "водопонижен",
                "водоотлив",
                "дренаж",
                "иглофильтр",
                "грунтовые воды",
                "откачка",
                "dewatering",
                "drainage",
            ],
            Category::Piling => &[
                "свая",
                "сваи",
                "свай",
                "ростверк",
                "забивк",
                "срубка голов",
                "pile",
                "piling",
            ],
            Category::Earthworks => &[
                "грунт",
                "земляные",
                "котлован",
                "выемк",
                "насып",
                "обратная засыпка",
                "засыпк",
                "планировк",
                "excavation",
                "backfill",
                "earthwork",
                "soil",
                "grading",
            ],
            Category::MonolithicWorks => &[
                "монолит",
                "бетон",
                "опалубк",
                "армирован",
                "арматур",
                "железобетон",
                "фундамент",
                "перекрыти",
                "колонн",
                "concrete",
                "formwork",
                "reinforc",
                "foundation",
                "monolith",
            ],
            Category::Waterproofing => &[
                "гидроизоляц",
                "утеплен",
                "теплоизоляц",
                "герметизац",
                "пенополистирол",
                "минват",
                "waterproof",
                "insulation",
            ],
            Category::Masonry => &[
                "кладк",
                "кирпич",
                "перегородк",
                "газобетон",
                "пеноблок",
                "керамический блок",
                "masonry",
                "brick",
                "blockwork",
                "partition",
            ],
            Category::Roofing => &[
                "кровл",
                "крыш",
                "водосток",
                "пароизоляц",
                "roof",
                "gutter",
            ],
            Category::Facade => &[
                "фасад",
                "облицовк",
                "клинкер",
                "керамогранит",
                "facade",
                "cladding",
            ],
            Category::Windows => &[
                "оконн",
                "окна",
                "витраж",
                "остеклен",
                "стеклопакет",
                "светопрозрачн",
                "двер",
                "window",
                "glazing",
                "door",
            ],
            Category::SiteImprovements => &[
                "благоустройств",
                "асфальт",
                "озеленен",
                "тротуар",
                "газон",
                "парковк",
                "детская площадка",
                "landscap",
                "paving",
                "external works",
            ],
            Category::GeneralConstruction => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
