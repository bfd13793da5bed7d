//! Built-in school layout used when no point collection exists on disk.

use crate::NavigationPoint;

struct SeedPoint {
    id: &'static str,
    name: &'static str,
    x: f64,
    y: f64,
    floor: i32,
    description: &'static str,
    category: &'static str,
}

const fn seed(
    id: &'static str,
    name: &'static str,
    (x, y): (f64, f64),
    floor: i32,
    description: &'static str,
    category: &'static str,
) -> SeedPoint {
    SeedPoint {
        id,
        name,
        x,
        y,
        floor,
        description,
        category,
    }
}

#[rustfmt::skip]
const SCHOOL_LAYOUT: [SeedPoint; 33] = [
    // Floor 1: entrance and wing B
    seed("entrance_1", "Центральный вход", (265.0, 340.0), 1, "Главный вход в школу", "entrance"),
    seed("classroom_B115", "Класс Б115", (189.0, 320.0), 1, "Кабинет Б115", "classroom"),
    seed("classroom_B116", "Класс Б116", (145.0, 320.0), 1, "Кабинет Б116", "classroom"),
    seed("classroom_B117", "Класс Б117", (97.0, 319.0), 1, "Кабинет Б117", "classroom"),
    seed("classroom_B119", "Класс Б119", (52.0, 320.0), 1, "Кабинет Б119", "classroom"),
    seed("classroom_B120", "Класс Б120", (48.0, 277.0), 1, "Кабинет Б120", "classroom"),
    seed("classroom_B122", "Класс Б122", (121.0, 277.0), 1, "Кабинет Б122", "classroom"),
    seed("classroom_B135", "Класс Б135", (434.0, 318.0), 1, "Кабинет Б135", "classroom"),
    // Floor 1: wings V and G
    seed("classroom_V134", "Класс В134", (483.0, 318.0), 1, "Кабинет В134", "classroom"),
    seed("classroom_V136", "Класс В136", (388.0, 318.0), 1, "Кабинет В136", "classroom"),
    seed("classroom_V137", "Класс В137", (334.0, 320.0), 1, "Кабинет В137", "classroom"),
    seed("classroom_G164", "Класс Г164", (318.0, 67.0), 1, "Кабинет Г164", "classroom"),
    seed("classroom_G167", "Класс Г167", (400.0, 111.0), 1, "Кабинет Г167", "classroom"),
    seed("classroom_G168", "Класс Г168", (346.0, 105.0), 1, "Кабинет Г168", "classroom"),
    seed("lecture_hall", "Лекционный зал Г167", (393.0, 68.0), 1, "Лекционный зал", "hall"),
    // Floor 1: services
    seed("kitchen", "Кухня", (157.0, 91.0), 1, "Школьная кухня", "cafeteria"),
    seed("dining_hall", "Зал приема пищи", (225.0, 93.0), 1, "Столовая", "cafeteria"),
    seed("elevator_1", "Лифт", (299.0, 276.0), 1, "Лифт", "elevator"),
    seed("stair_1", "Лестница", (550.0, 200.0), 1, "Главная лестница", "stair"),
    seed("toilet_1_male", "Мужской туалет", (600.0, 300.0), 1, "Мужской туалет", "toilet"),
    seed("toilet_1_female", "Женский туалет", (620.0, 300.0), 1, "Женский туалет", "toilet"),
    // Floor 2
    seed("stair_2", "Лестница", (550.0, 200.0), 2, "Лестница на 2 этаже", "stair"),
    seed("classroom_201", "Кабинет 201", (200.0, 150.0), 2, "Кабинет физики", "classroom"),
    seed("classroom_202", "Кабинет 202", (300.0, 150.0), 2, "Кабинет химии", "classroom"),
    seed("library", "Библиотека", (400.0, 250.0), 2, "Школьная библиотека", "library"),
    seed("toilet_2_male", "Мужской туалет", (600.0, 300.0), 2, "Мужской туалет", "toilet"),
    seed("toilet_2_female", "Женский туалет", (620.0, 300.0), 2, "Женский туалет", "toilet"),
    // Floor 3
    seed("stair_3", "Лестница", (550.0, 200.0), 3, "Лестница на 3 этаже", "stair"),
    seed("classroom_301", "Кабинет 301", (200.0, 150.0), 3, "Кабинет информатики", "classroom"),
    seed("classroom_302", "Кабинет 302", (300.0, 150.0), 3, "Кабинет иностранных языков", "classroom"),
    seed("assembly_hall", "Актовый зал", (400.0, 250.0), 3, "Актовый зал", "hall"),
    seed("toilet_3_male", "Мужской туалет", (600.0, 300.0), 3, "Мужской туалет", "toilet"),
    seed("toilet_3_female", "Женский туалет", (620.0, 300.0), 3, "Женский туалет", "toilet"),
];

/// Return the default school layout in display order.
pub fn school_layout() -> Vec<NavigationPoint> {
    SCHOOL_LAYOUT
        .iter()
        .map(|seed| NavigationPoint {
            id: seed.id.to_owned(),
            name: seed.name.to_owned(),
            x: seed.x,
            y: seed.y,
            floor: seed.floor,
            description: seed.description.to_owned(),
            category: seed.category.to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::school_layout;

    #[rstest]
    fn seed_ids_are_unique() {
        let layout = school_layout();
        let ids: HashSet<_> = layout.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), layout.len());
    }

    #[rstest]
    #[case(1, 21)]
    #[case(2, 6)]
    #[case(3, 6)]
    fn seed_covers_three_floors(#[case] floor: i32, #[case] expected: usize) {
        let count = school_layout().iter().filter(|p| p.floor == floor).count();
        assert_eq!(count, expected);
    }
}
