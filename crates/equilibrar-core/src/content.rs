//! Program content: the four weekly modules and their reflective guides.

use std::sync::LazyLock;

use serde::Serialize;

use crate::models::progress::ProgramWeek;

#[derive(Debug, Clone, Serialize)]
pub struct WeekContent {
    pub week: ProgramWeek,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub audio_title: &'static str,
    /// Whether the week includes a meeting with the professional.
    pub has_meet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideQuestionKind {
    Text,
    Scale,
    Choice,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuideQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub kind: GuideQuestionKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuideStep {
    pub title: &'static str,
    pub description: &'static str,
    pub questions: Vec<GuideQuestion>,
}

static WEEKLY_CONTENT: [WeekContent; 4] = [
    WeekContent {
        week: ProgramWeek::ALL[0],
        title: "Comprender la culpa",
        subtitle: "Sin juzgarla",
        description: "Diferenciar la culpa como señal de la culpa como castigo interno.",
        audio_title: "Audio 1: Desactivar la Alerta",
        has_meet: true,
    },
    WeekContent {
        week: ProgramWeek::ALL[1],
        title: "Regular la culpa no adaptativa",
        subtitle: "Reducir el autoataque",
        description: "Reducir el autoataque y permitir la regulación del sistema nervioso.",
        audio_title: "Audio 1: Desactivar la Alerta (Refuerzo)",
        has_meet: false,
    },
    WeekContent {
        week: ProgramWeek::ALL[2],
        title: "Separar identidad de experiencia",
        subtitle: "Diferenciación",
        description: "Diferenciar lo que ocurrió de quién soy. Reorganizar la respuesta.",
        audio_title: "Audio 2: Reorganizar la Respuesta",
        has_meet: false,
    },
    WeekContent {
        week: ProgramWeek::ALL[3],
        title: "Diálogo interno saludable",
        subtitle: "Consolidación",
        description: "Consolidar una relación interna basada en responsabilidad consciente.",
        audio_title: "Audio 2: Reorganizar la Respuesta (Consolidación)",
        has_meet: true,
    },
];

pub fn week_content(week: ProgramWeek) -> &'static WeekContent {
    &WEEKLY_CONTENT[week.index()]
}

pub fn all_week_content() -> &'static [WeekContent] {
    &WEEKLY_CONTENT
}

fn text(id: &'static str, text: &'static str) -> GuideQuestion {
    GuideQuestion {
        id,
        text,
        kind: GuideQuestionKind::Text,
    }
}

static GUIDES: LazyLock<[Vec<GuideStep>; 4]> = LazyLock::new(|| {
    [
        vec![
            GuideStep {
                title: "Exploración Inicial",
                description: "Observa tu experiencia sin intentar cambiarla todavía.",
                questions: vec![
                    text("w1-q1", "¿En qué situaciones aparece con más fuerza la culpa?"),
                    text("w1-q2", "¿Qué frases internas la acompañan?"),
                ],
            },
            GuideStep {
                title: "Observación Corporal",
                description: "Conecta con la sensación física.",
                questions: vec![
                    text("w1-q3", "¿Dónde la siento en el cuerpo?"),
                    text("w1-q4", "¿Qué cambia en mi respiración o tensión corporal?"),
                ],
            },
        ],
        vec![
            GuideStep {
                title: "Exploración de Miedos",
                description: "Entendiendo la función protectora del castigo.",
                questions: vec![
                    text("w2-q1", "¿Qué temo que ocurra si no me castigo?"),
                    text("w2-q2", "¿Qué pasaría si fuera más amable conmigo?"),
                ],
            },
            GuideStep {
                title: "Post-Audio",
                description: "Reflexión después de la práctica auditiva.",
                questions: vec![GuideQuestion {
                    id: "w2-q3",
                    text: "¿Baja la intensidad de la culpa después de escuchar?",
                    kind: GuideQuestionKind::Scale,
                }],
            },
        ],
        vec![GuideStep {
            title: "Identidad vs Experiencia",
            description: "Separando el ser del hacer.",
            questions: vec![
                text("w3-q1", "¿Qué me digo cuando me equivoco?"),
                GuideQuestion {
                    id: "w3-q2",
                    text: "¿Le diría esto a alguien que quiero?",
                    kind: GuideQuestionKind::Choice,
                },
            ],
        }],
        vec![GuideStep {
            title: "Integración Final",
            description: "Hacia una responsabilidad consciente.",
            questions: vec![
                text("w4-q1", "¿Qué entiendo hoy por culpa que antes no veía?"),
                text("w4-q2", "Puedo hacerme responsable de ______ sin dañarme."),
            ],
        }],
    ]
});

pub fn guide(week: ProgramWeek) -> &'static [GuideStep] {
    &GUIDES[week.index()]
}
