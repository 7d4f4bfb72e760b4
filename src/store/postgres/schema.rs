//! Diesel schema for mentorship persistence.

diesel::table! {
    /// Login identities.
    users (user_id) {
        /// Cohort-prefixed user identifier.
        #[max_length = 32]
        user_id -> Varchar,
        /// Stored role, authoritative over the ID prefix.
        #[max_length = 20]
        role -> Varchar,
        /// Opaque login credential.
        credential -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student profiles with the warning counter cache.
    students (student_id) {
        /// Student user identifier.
        #[max_length = 32]
        student_id -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional photo URL.
        photo -> Nullable<Text>,
        /// Social profile links keyed by network.
        social_links -> Jsonb,
        /// Number of warnings ever issued.
        warning_count -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mentor-student roster links.
    mentor_students (mentor_id, student_id) {
        /// Mentor user identifier.
        #[max_length = 32]
        mentor_id -> Varchar,
        /// Student user identifier.
        #[max_length = 32]
        student_id -> Varchar,
        /// Whether the link currently authorizes the mentor.
        is_active -> Bool,
        /// When the link was first created.
        assigned_at -> Timestamptz,
        /// Last activation change.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Courses owned by mentors.
    courses (id) {
        /// Course identifier.
        id -> Uuid,
        /// Owning mentor.
        #[max_length = 32]
        mentor_id -> Varchar,
        /// Course title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional course URL.
        url -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mentor-authored task templates.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Course the task belongs to.
        course_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Optional documentation link.
        doc_link -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task assignments, unique per task and student.
    task_assignments (id) {
        /// Assignment identifier.
        id -> Uuid,
        /// Assigned task.
        task_id -> Uuid,
        /// Assigned student.
        #[max_length = 32]
        student_id -> Varchar,
        /// Submitted repository link.
        github_link -> Nullable<Text>,
        /// Submitted deployment link.
        hosted_link -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Mentor review remark.
        mentor_remark -> Nullable<Text>,
        /// Assignment timestamp.
        assigned_at -> Timestamptz,
        /// Latest submission timestamp.
        submitted_at -> Nullable<Timestamptz>,
        /// Latest review timestamp.
        reviewed_at -> Nullable<Timestamptz>,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Behavioural warnings.
    warnings (id) {
        /// Warning identifier.
        id -> Uuid,
        /// Warned student.
        #[max_length = 32]
        student_id -> Varchar,
        /// Issuing mentor.
        #[max_length = 32]
        mentor_id -> Varchar,
        /// Warning title.
        #[max_length = 255]
        title -> Varchar,
        /// Mentor remark.
        remark -> Text,
        /// Severity level.
        #[max_length = 20]
        level -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Student's resolution comment.
        resolution_comment -> Nullable<Text>,
        /// Resolution timestamp.
        resolved_at -> Nullable<Timestamptz>,
        /// Issue timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user notifications.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Recipient.
        #[max_length = 32]
        user_id -> Varchar,
        /// Rendered message.
        message -> Text,
        /// Notification type.
        #[max_length = 40]
        kind -> Varchar,
        /// Related entity identifier.
        related_id -> Nullable<Text>,
        /// Read flag.
        is_read -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Read timestamp.
        read_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(tasks -> courses (course_id));
diesel::joinable!(task_assignments -> tasks (task_id));
diesel::joinable!(mentor_students -> students (student_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    students,
    mentor_students,
    courses,
    tasks,
    task_assignments,
    warnings,
    notifications,
);
