//! Hand-authored resolved tickets shown as "similar" to every analysis.
//!
//! These are illustrative fixtures. Only the ticket topic is interpolated
//! into the titles; nothing is ranked or searched.

use crate::types::{Priority, SimilarTicket, Topic};

/// The fixed similar-ticket list for a topic, most similar first.
pub fn similar_tickets(topic: Topic) -> Vec<SimilarTicket> {
    vec![
        SimilarTicket {
            id: "TKT-2024-001".to_string(),
            title: format!("{topic} production incident - connection pool exhaustion"),
            description: POOL_EXHAUSTION_DESCRIPTION.to_string(),
            priority: Priority::Critical,
            department: "Infrastructure".to_string(),
            status: "Resolved".to_string(),
            resolution: POOL_EXHAUSTION_RESOLUTION.to_string(),
            resolved_at: "2024-01-15T14:23:00Z".to_string(),
            similarity: 89,
        },
        SimilarTicket {
            id: "TKT-2024-045".to_string(),
            title: format!("{topic} service degradation - memory leak detected"),
            description: MEMORY_LEAK_DESCRIPTION.to_string(),
            priority: Priority::High,
            department: "Engineering".to_string(),
            status: "Resolved".to_string(),
            resolution: MEMORY_LEAK_RESOLUTION.to_string(),
            resolved_at: "2024-01-20T09:15:00Z".to_string(),
            similarity: 76,
        },
    ]
}

const POOL_EXHAUSTION_DESCRIPTION: &str = r#"SEVERITY: P1 - Production outage affecting 45% of traffic

ERROR LOG:
Exception in thread "http-nio-8080-exec-47"
java.sql.SQLTransientConnectionException: HikariPool-1 - Connection is not available, request timed out after 30000ms.
  at com.zaxxer.hikari.pool.HikariPool.getConnection(HikariPool.java:197)
  at com.zaxxer.hikari.pool.HikariPool.getConnection(HikariPool.java:162)

METRICS AT INCIDENT TIME:
- Active DB connections: 50/50 (100% utilization)
- Avg query time: 2.3s (baseline: 120ms)
- Request queue depth: 1247 pending
- CPU: 87% (normally 35%)
- Memory: 11.2GB / 16GB

AFFECTED ENDPOINTS:
- GET /api/v1/users/* → 503 Service Unavailable
- POST /api/v1/orders → Timeout after 30s"#;

const POOL_EXHAUSTION_RESOLUTION: &str = r#"RESOLUTION SUMMARY:

ROOT CAUSE:
N+1 query pattern introduced in PR #4521 causing exponential connection consumption. Each user fetch triggered 12 additional queries for related entities without proper JOIN optimization.

CODE FIX:
```java
// BEFORE (Bad)
@GetMapping("/users/{id}")
public User getUser(@PathVariable Long id) {
    User user = userRepository.findById(id);
    user.getOrders(); // Triggers separate query
    user.getProfile(); // Triggers separate query  
    user.getPermissions(); // Triggers separate query
    return user;
}

// AFTER (Fixed)
@GetMapping("/users/{id}")
public User getUser(@PathVariable Long id) {
    return userRepository.findByIdWithAssociations(id);
}

@Query("SELECT u FROM User u " +
       "LEFT JOIN FETCH u.orders " +
       "LEFT JOIN FETCH u.profile " +
       "LEFT JOIN FETCH u.permissions " +
       "WHERE u.id = :id")
User findByIdWithAssociations(@Param("id") Long id);
```

INFRASTRUCTURE CHANGES:
1. Increased connection pool: 50 → 100 (HikariCP maxPoolSize)
2. Added connection timeout: 30s → 20s (fail faster)
3. Enabled statement caching: prepStmtCacheSize=250

DATABASE OPTIMIZATION:
```sql
CREATE INDEX idx_orders_user_id ON orders(user_id);
CREATE INDEX idx_profiles_user_id ON profiles(user_id);
CREATE INDEX idx_permissions_user_id ON user_permissions(user_id);

ANALYZE users, orders, profiles, user_permissions;
```

RESULTS:
✓ Query time: 2.3s → 95ms (96% improvement)
✓ Connection utilization: 100% → 35%
✓ Request success rate: 55% → 99.97%
✓ p95 latency: 4200ms → 180ms

DEPLOYMENT:
- Deployed via blue-green strategy
- Zero downtime
- Full rollout completed in 12 minutes

POSTMORTEM ACTIONS:
[ ] Add query performance tests to CI/CD
[ ] Implement connection pool monitoring alerts
[ ] Update code review checklist for ORM patterns
[ ] Add database query audit to PR template"#;

const MEMORY_LEAK_DESCRIPTION: &str = r#"INCIDENT REPORT:

ERROR PATTERN:
OutOfMemoryError: Java heap space
  at java.util.Arrays.copyOf(Arrays.java:3332)
  at java.util.ArrayList.grow(ArrayList.java:275)
  
HEAP DUMP ANALYSIS:
Top memory consumers:
1. ConcurrentHashMap instances: 4.2GB (38%)
2. ArrayList instances: 2.8GB (25%)
3. String instances: 1.9GB (17%)

GC METRICS:
- Full GC frequency: Every 2.3 minutes (normally: 1/hour)
- GC pause time: avg 8.7s, max 23.4s
- Heap after GC: 10.1GB / 12GB (84% full)

APPLICATION SYMPTOMS:
- Response times degrading over time: 200ms → 5000ms
- CPU spiking to 100% during GC
- Container restart count: 47 in 6 hours"#;

const MEMORY_LEAK_RESOLUTION: &str = r#"TECHNICAL RESOLUTION:

MEMORY LEAK SOURCE:
Event listener accumulation in WebSocket handler. Each connection registered a listener without cleanup on disconnect.

```javascript
// PROBLEMATIC CODE:
class WebSocketHandler {
  constructor() {
    this.connections = new Map();
    this.listeners = new Map(); // LEAK: never cleaned up
  }
  
  onConnect(socket) {
    const listener = (data) => socket.send(data);
    eventEmitter.on('update', listener);
    this.listeners.set(socket.id, listener); // Added but never removed
  }
  
  onDisconnect(socket) {
    this.connections.delete(socket.id);
    // BUG: Forgot to remove listener!
  }
}

// FIXED CODE:
class WebSocketHandler {
  onDisconnect(socket) {
    const listener = this.listeners.get(socket.id);
    if (listener) {
      eventEmitter.off('update', listener);
      this.listeners.delete(socket.id);
    }
    this.connections.delete(socket.id);
  }
}
```

MONITORING SETUP:
```yaml
# prometheus-rules.yml
groups:
  - name: memory_alerts
    rules:
      - alert: HighMemoryUsage
        expr: container_memory_usage_bytes / container_spec_memory_limit_bytes > 0.85
        for: 5m
        annotations:
          description: "Memory usage above 85% for {{ $labels.pod }}"
      
      - alert: FrequentGC
        expr: rate(jvm_gc_collection_seconds_count[5m]) > 10
        annotations:
          description: "GC frequency abnormally high"
```

PERFORMANCE IMPACT:
✓ Memory usage: 11.2GB → 3.8GB (stable)
✓ GC pause: 8.7s → 120ms average
✓ Connection capacity: 500 → 10,000 concurrent
✓ Zero memory-related crashes since fix

PREVENTION:
- Added memory profiling to staging tests
- Implemented automatic heap dump on OOM
- Set up memory leak detection in CI"#;

#[cfg(test)]
mod tests {
    use super::similar_tickets;
    use crate::types::Topic;
    use pretty_assertions::assert_eq;

    #[test]
    fn titles_carry_topic_and_order_is_fixed() {
        let tickets = similar_tickets(Topic::Api);
        let ids: Vec<&str> = tickets.iter().map(|ticket| ticket.id.as_str()).collect();
        assert_eq!(ids, vec!["TKT-2024-001", "TKT-2024-045"]);
        assert_eq!(
            tickets[0].title,
            "api production incident - connection pool exhaustion"
        );
        assert_eq!(tickets[0].similarity, 89);
        assert_eq!(tickets[1].similarity, 76);
    }

    #[test]
    fn incident_reports_keep_traces_and_code() {
        let tickets = similar_tickets(Topic::Database);
        assert!(tickets[0].description.contains("HikariPool.java:162"));
        assert!(tickets[0].resolution.contains("```java"));
        assert!(tickets[0].resolution.contains("POSTMORTEM ACTIONS:"));
        assert!(tickets[1].description.contains("Top memory consumers:"));
        assert!(tickets[1].resolution.contains("eventEmitter.off('update', listener);"));
        assert!(tickets[1].resolution.contains("# prometheus-rules.yml"));
    }
}
